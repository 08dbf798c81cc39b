use actix_web::{get, post, web, HttpResponse, Result as WebResult};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::api::models::{ChatSettings, SearchChatRequest};
use crate::api::PipelineError;
use crate::config::AppConfig;
use crate::db::{service::DbService, DbPool, PersistTarget};
use crate::llm::{ChatOptions, LlmProvider};
use crate::prompt;
use crate::search::SearchProvider;

const OFFLINE_NOTICE: &str =
    "The web search service is unreachable right now. Please try again in a moment.";

#[post("/chat/search")]
pub async fn search_chat(
    config: web::Data<AppConfig>,
    pool: web::Data<DbPool>,
    search: web::Data<Arc<dyn SearchProvider>>,
    llm: web::Data<Arc<dyn LlmProvider>>,
    req: web::Json<SearchChatRequest>,
) -> WebResult<HttpResponse> {
    let req = req.into_inner();

    // Reachability first: if the provider is down we answer "offline" before
    // looking at the request at all.
    if let Err(e) = search.ping().await {
        error!("Search provider unreachable: {}", e);
        return Ok(HttpResponse::ServiceUnavailable().json(json!({ "error": OFFLINE_NOTICE })));
    }

    let query = match req.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => {
            return Ok(HttpResponse::BadRequest()
                .json(json!({ "error": "Query parameter is required" })))
        }
    };

    let settings = req.chat_settings.unwrap_or_default();

    match run_pipeline(&config, &pool, &search, &llm, &query, &settings, &req.messages).await {
        Ok(message) => Ok(HttpResponse::Ok().json(json!({ "message": message }))),
        Err(e) => {
            error!("Search chat pipeline failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })))
        }
    }
}

/// Steps 3-8 of the request: search, normalize, reconcile history, assemble
/// the prompt, complete, and best-effort persist the two turns. Everything
/// here propagates to the single catch in `search_chat`.
async fn run_pipeline(
    config: &AppConfig,
    pool: &DbPool,
    search: &Arc<dyn SearchProvider>,
    llm: &Arc<dyn LlmProvider>,
    query: &str,
    settings: &ChatSettings,
    raw_history: &[serde_json::Value],
) -> Result<String, PipelineError> {
    let results = search.search(query).await?;

    let history = prompt::flatten_history(raw_history);
    let messages = prompt::build_prompt(&config.chat.system_prompt, query, &results, &history);

    // Advisory writes keyed off the last history entry. No identifiers there
    // means this conversation is not persisted, which is not an error.
    let target = PersistTarget::from_history(raw_history);
    let model = settings.model.as_deref();

    if let Some(target) = &target {
        DbService::record_turn(pool, &target.user_row(query, model));
    }

    let options = ChatOptions {
        temperature: Some(settings.temperature.unwrap_or(0.0)),
        max_tokens: Some(config.chat.max_completion_tokens),
    };
    let response = llm.chat(&messages, options).await?;

    if let Some(target) = &target {
        if !response.content.is_empty() {
            DbService::record_turn(pool, &target.assistant_row(&response.content, model));
        }
    }

    Ok(response.content)
}

#[get("/chat/{chat_id}/messages")]
pub async fn get_chat_messages(
    pool: web::Data<DbPool>,
    chat_id: web::Path<String>,
) -> WebResult<HttpResponse> {
    let conn = match pool.lock() {
        Ok(conn) => conn,
        Err(e) => {
            return Ok(HttpResponse::InternalServerError().body(e.to_string()));
        }
    };

    match DbService::get_messages(&conn, &chat_id) {
        Ok(messages) => Ok(HttpResponse::Ok().json(messages)),
        Err(e) => Ok(HttpResponse::InternalServerError().body(e.to_string())),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .service(search_chat)
            .service(get_chat_messages),
    );
}
