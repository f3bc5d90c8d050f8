use aws_sdk_ecs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ecs::operation::update_service::UpdateServiceError;
use ecs_restart_lambda::adapters::ecs::ServiceRestarter;
use ecs_restart_lambda::handlers::restart::handle_restart_event;
use ecs_restart_lambda::runtime::config::{ECS_CLUSTER_VAR, ECS_SERVICES_VAR};
use ecs_restart_lambda::runtime::contract::{InvocationResult, UpdateError};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct AwsEcsRestarter {
    ecs_client: aws_sdk_ecs::Client,
}

impl ServiceRestarter for AwsEcsRestarter {
    fn force_new_deployment(&self, cluster: &str, service: &str) -> Result<(), UpdateError> {
        let client = self.ecs_client.clone();
        let cluster = cluster.to_string();
        let service = service.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .update_service()
                    .cluster(cluster)
                    .service(service)
                    .force_new_deployment(true)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(classify_update_error)
            })
        })
    }
}

fn classify_update_error(error: SdkError<UpdateServiceError>) -> UpdateError {
    match error.as_service_error() {
        Some(service_error) => UpdateError::api(
            service_error
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| service_error.to_string()),
        ),
        None => UpdateError::unexpected(DisplayErrorContext(&error).to_string()),
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<InvocationResult, Error> {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let restarter = AwsEcsRestarter {
        ecs_client: aws_sdk_ecs::Client::new(&config),
    };

    let cluster = std::env::var(ECS_CLUSTER_VAR).ok();
    let services_json = std::env::var(ECS_SERVICES_VAR).ok();

    Ok(handle_restart_event(
        event.payload,
        cluster.as_deref(),
        services_json.as_deref(),
        &restarter,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
