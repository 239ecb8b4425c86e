use crate::pb::HealthRes;

/// Simple health service that can be used by both gRPC and REST APIs
///
/// Reports healthy once the built-in knowledge base has loaded; a broken knowledge base is
/// reported as `ok: false` with the load error as the message.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn check_health() -> HealthRes {
        match pulmo_core::KnowledgeBase::builtin() {
            Ok(_) => HealthRes {
                ok: true,
                message: "Pulmo assistant is alive".into(),
            },
            Err(e) => HealthRes {
                ok: false,
                message: e.to_string(),
            },
        }
    }
}
