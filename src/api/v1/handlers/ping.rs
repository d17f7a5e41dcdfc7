use crate::api::v1::{
    dto::{echo::PingResponse, envelope::ApiResponse},
    extractors::RequestContext,
};

pub async fn ping(ctx: RequestContext) -> ApiResponse<PingResponse> {
    ApiResponse::success(
        "pong",
        PingResponse {
            message: "pong",
            request_id: ctx.request_id().unwrap_or_default().to_string(),
        },
    )
}
