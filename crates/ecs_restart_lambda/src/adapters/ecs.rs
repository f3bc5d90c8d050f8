use crate::runtime::contract::UpdateError;

/// Control-plane seam for forcing a new deployment of one service.
///
/// The production implementation wraps the ECS `UpdateService` operation;
/// the returned service descriptor is not inspected beyond success.
pub trait ServiceRestarter {
    fn force_new_deployment(&self, cluster: &str, service: &str) -> Result<(), UpdateError>;
}
