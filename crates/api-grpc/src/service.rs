// Re-export the proto module from the shared `api-shared` crate so callers
// can reference `api_grpc::pb`.
pub use api_shared::pb;

use api_shared::chat::list_conditions_res;
use api_shared::pb::assistant_server::Assistant;
use api_shared::{auth, HealthService};
use pulmo_core::AssistantService;
use std::sync::Arc;
use tonic::service::Interceptor;
use tonic::{Request, Response, Status};

/// Authentication interceptor for gRPC requests.
///
/// Checks the `x-api-key` metadata entry against the key configured at startup.
#[derive(Clone, Debug)]
pub struct ApiKeyInterceptor {
    expected_key: Option<Arc<str>>,
}

impl ApiKeyInterceptor {
    pub fn new(expected_key: Option<&str>) -> Self {
        Self {
            expected_key: expected_key.map(Arc::from),
        }
    }
}

impl Interceptor for ApiKeyInterceptor {
    fn call(&mut self, req: Request<()>) -> Result<Request<()>, Status> {
        let api_key = req
            .metadata()
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Status::unauthenticated("Missing x-api-key header"))?;

        auth::validate_api_key(api_key, self.expected_key.as_deref())?;
        Ok(req)
    }
}

/// gRPC front end over the stateless assistant. Keeps no transcript.
#[derive(Clone, Debug)]
pub struct PulmoService {
    assistant: AssistantService,
}

impl PulmoService {
    pub fn new(assistant: AssistantService) -> Self {
        Self { assistant }
    }
}

#[tonic::async_trait]
impl Assistant for PulmoService {
    async fn health(&self, _req: Request<()>) -> Result<Response<pb::HealthRes>, Status> {
        Ok(Response::new(HealthService::check_health()))
    }

    async fn list_conditions(
        &self,
        _req: Request<()>,
    ) -> Result<Response<pb::ListConditionsRes>, Status> {
        let conditions = self.assistant.list_conditions();
        Ok(Response::new(list_conditions_res(&conditions)))
    }

    async fn list_examples(
        &self,
        _req: Request<()>,
    ) -> Result<Response<pb::ListExamplesRes>, Status> {
        Ok(Response::new(pb::ListExamplesRes {
            examples: self.assistant.example_questions().to_vec(),
        }))
    }

    async fn ask(&self, req: Request<pb::AskReq>) -> Result<Response<pb::AskRes>, Status> {
        let req = req.into_inner();
        let reply = self.assistant.reply(&req.message);
        tracing::info!(kind = %reply.kind, "ask answered");
        Ok(Response::new(pb::AskRes::from(&reply)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::metadata::MetadataValue;
    use tonic::Code;

    fn service() -> PulmoService {
        PulmoService::new(AssistantService::new().expect("assistant"))
    }

    #[tokio::test]
    async fn ask_returns_report_for_known_keyword() {
        let res = service()
            .ask(Request::new(pb::AskReq {
                message: "Child has persistent cough for 6 weeks after a cold".into(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(res.kind, "report");
        assert_eq!(res.condition_id, "chronic cough");
        assert!(res.reply.contains("Possible Condition: Chronic Cough**"));
    }

    #[tokio::test]
    async fn ask_with_blank_message_prompts() {
        let res = service()
            .ask(Request::new(pb::AskReq {
                message: "  ".into(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(res.kind, "prompt");
        assert!(res.condition_id.is_empty());
    }

    #[tokio::test]
    async fn list_conditions_returns_catalog() {
        let res = service()
            .list_conditions(Request::new(()))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(res.conditions.len(), 14);
        assert_eq!(res.conditions[0].id, "asthma");
        assert_eq!(res.conditions[0].category, "common");
    }

    #[tokio::test]
    async fn health_is_ok() {
        let res = service().health(Request::new(())).await.unwrap().into_inner();
        assert!(res.ok);
    }

    #[test]
    fn interceptor_requires_header() {
        let mut interceptor = ApiKeyInterceptor::new(Some("secret"));
        let status = interceptor.call(Request::new(())).unwrap_err();
        assert_eq!(status.code(), Code::Unauthenticated);
    }

    #[test]
    fn interceptor_accepts_matching_key() {
        let mut interceptor = ApiKeyInterceptor::new(Some("secret"));
        let mut req = Request::new(());
        req.metadata_mut()
            .insert("x-api-key", MetadataValue::from_static("secret"));
        assert!(interceptor.call(req).is_ok());
    }
}
