use serde_json::{json, Value};

use crate::adapters::ecs::ServiceRestarter;
use crate::runtime::config::RestartConfig;
use crate::runtime::contract::{InvocationResult, UpdateErrorKind};

/// Entry point for one restart invocation.
///
/// `event` follows the host calling convention and is never inspected; the
/// outcome depends only on the two configuration values and the control
/// plane's responses. Update requests are issued one at a time, in list
/// order, and processing stops at the first failure. Services updated before
/// that point are not rolled back.
pub fn handle_restart_event(
    _event: Value,
    cluster: Option<&str>,
    services_json: Option<&str>,
    restarter: &dyn ServiceRestarter,
) -> InvocationResult {
    let config = match RestartConfig::resolve(cluster, services_json) {
        Ok(value) => value,
        Err(error) => {
            log_error("configuration_rejected", json!({ "error": error.message() }));
            return InvocationResult::server_error(error.message());
        }
    };

    for service in &config.services {
        log_info(
            "service_restart_requested",
            json!({
                "cluster": config.cluster.clone(),
                "service": service.clone(),
            }),
        );

        if let Err(error) = restarter.force_new_deployment(&config.cluster, service) {
            log_error(
                "service_restart_failed",
                json!({
                    "cluster": config.cluster.clone(),
                    "service": service.clone(),
                    "error": error.message.clone(),
                }),
            );

            let body = match error.kind {
                UpdateErrorKind::Api => {
                    format!("ECS error restarting services: {}", error.message)
                }
                UpdateErrorKind::Unexpected => {
                    format!("Unexpected error occurred: {}", error.message)
                }
            };
            return InvocationResult::server_error(body);
        }
    }

    InvocationResult::ok(format!(
        "Restarted services: {}",
        config.services.join(", ")
    ))
}

fn log_info(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "restart_handler",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_error(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "restart_handler",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::runtime::contract::UpdateError;

    struct RecordingRestarter {
        calls: Mutex<Vec<(String, String)>>,
        failure: Option<(String, UpdateError)>,
    }

    impl RecordingRestarter {
        fn succeeding() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failure: None,
            }
        }

        fn failing_on(service: &str, error: UpdateError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failure: Some((service.to_string(), error)),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().expect("poisoned mutex").clone()
        }
    }

    impl ServiceRestarter for RecordingRestarter {
        fn force_new_deployment(&self, cluster: &str, service: &str) -> Result<(), UpdateError> {
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push((cluster.to_string(), service.to_string()));

            match &self.failure {
                Some((failing, error)) if failing == service => Err(error.clone()),
                _ => Ok(()),
            }
        }
    }

    #[test]
    fn restarts_every_service_in_listed_order() {
        let restarter = RecordingRestarter::succeeding();
        let result = handle_restart_event(
            json!({}),
            Some("test-cluster"),
            Some(r#"["service1", "service2"]"#),
            &restarter,
        );

        assert_eq!(result.status_code, 200);
        assert_eq!(result.body, "Restarted services: service1, service2");
        assert_eq!(
            restarter.calls(),
            vec![
                ("test-cluster".to_string(), "service1".to_string()),
                ("test-cluster".to_string(), "service2".to_string()),
            ]
        );
    }

    #[test]
    fn reports_absent_configuration_without_calling_the_control_plane() {
        let restarter = RecordingRestarter::succeeding();
        let result = handle_restart_event(json!({}), None, None, &restarter);

        assert_eq!(result.status_code, 500);
        assert_eq!(result.body, "Missing ECS_CLUSTER or ECS_SERVICES");
        assert!(restarter.calls().is_empty());
    }

    #[test]
    fn reports_empty_configuration_without_calling_the_control_plane() {
        let restarter = RecordingRestarter::succeeding();
        let result = handle_restart_event(json!({}), Some(""), Some(""), &restarter);

        assert_eq!(result.status_code, 500);
        assert_eq!(result.body, "Missing ECS_CLUSTER or ECS_SERVICES");
        assert!(restarter.calls().is_empty());
    }

    #[test]
    fn rejects_malformed_services_json_without_calling_the_control_plane() {
        let restarter = RecordingRestarter::succeeding();
        let result = handle_restart_event(
            json!({}),
            Some("test-cluster"),
            Some("invalid-json"),
            &restarter,
        );

        assert_eq!(result.status_code, 500);
        assert!(result.body.starts_with("ECS_SERVICES is not valid JSON:"));
        assert!(restarter.calls().is_empty());
    }

    #[test]
    fn rejects_non_list_services_without_calling_the_control_plane() {
        let restarter = RecordingRestarter::succeeding();
        let result = handle_restart_event(
            json!({}),
            Some("test-cluster"),
            Some(r#""service1""#),
            &restarter,
        );

        assert_eq!(result.status_code, 500);
        assert_eq!(result.body, "ECS_SERVICES must be a JSON list");
        assert!(restarter.calls().is_empty());
    }

    #[test]
    fn stops_at_first_control_plane_failure() {
        let restarter =
            RecordingRestarter::failing_on("service2", UpdateError::api("Service not found"));
        let result = handle_restart_event(
            json!({}),
            Some("test-cluster"),
            Some(r#"["service1", "service2", "service3"]"#),
            &restarter,
        );

        assert_eq!(result.status_code, 500);
        assert_eq!(
            result.body,
            "ECS error restarting services: Service not found"
        );

        // service1 was restarted before the failure and stays restarted; the
        // response alone cannot tell, only the control-plane calls can.
        assert_eq!(
            restarter.calls(),
            vec![
                ("test-cluster".to_string(), "service1".to_string()),
                ("test-cluster".to_string(), "service2".to_string()),
            ]
        );
    }

    #[test]
    fn surfaces_control_plane_failure_for_a_single_unknown_service() {
        let restarter = RecordingRestarter::failing_on(
            "nonexistent-service",
            UpdateError::api("Service not found"),
        );
        let result = handle_restart_event(
            json!({}),
            Some("test-cluster"),
            Some(r#"["nonexistent-service"]"#),
            &restarter,
        );

        assert_eq!(result.status_code, 500);
        assert!(result.body.contains("Service not found"));
        assert_eq!(restarter.calls().len(), 1);
    }

    #[test]
    fn surfaces_unexpected_errors_with_their_description() {
        let restarter = RecordingRestarter::failing_on(
            "service1",
            UpdateError::unexpected("connection reset by peer"),
        );
        let result = handle_restart_event(
            json!({}),
            Some("test-cluster"),
            Some(r#"["service1"]"#),
            &restarter,
        );

        assert_eq!(result.status_code, 500);
        assert_eq!(
            result.body,
            "Unexpected error occurred: connection reset by peer"
        );
    }

    #[test]
    fn ignores_the_event_payload() {
        let empty_event = RecordingRestarter::succeeding();
        let scheduled_event = RecordingRestarter::succeeding();

        let from_empty = handle_restart_event(
            json!({}),
            Some("test-cluster"),
            Some(r#"["service1"]"#),
            &empty_event,
        );
        let from_scheduled = handle_restart_event(
            json!({
                "source": "aws.events",
                "detail-type": "Scheduled Event",
                "detail": {}
            }),
            Some("test-cluster"),
            Some(r#"["service1"]"#),
            &scheduled_event,
        );

        assert_eq!(from_empty, from_scheduled);
        assert_eq!(empty_event.calls(), scheduled_event.calls());
    }
}
