//! Idea handlers.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use ideaslab_core::domain::{Category, Idea, IdeaChanges, NewIdea};
use ideaslab_core::pipeline::{self, IdeaSummary, ListQuery};
use ideaslab_shared::dto::{
    CategoryCountResponse, CreateIdeaRequest, IdeaCardResponse, IdeaResponse, IdeaSummaryResponse,
    ListIdeasParams, UpdateIdeaRequest,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Characters of description shown on a card when no excerpt is set.
const PREVIEW_CHARS: usize = 120;

/// GET /api/ideas
///
/// Anonymous callers get an empty list.
pub async fn list(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    params: web::Query<ListIdeasParams>,
) -> AppResult<HttpResponse> {
    let ideas = state.ideas.list(identity.user_id()).await?;
    let query = list_query(params.into_inner());

    let now = Utc::now();
    let cards: Vec<IdeaCardResponse> = pipeline::apply(ideas, &query)
        .iter()
        .map(|idea| card_response(idea, now))
        .collect();

    Ok(HttpResponse::Ok().json(cards))
}

/// GET /api/ideas/summary
pub async fn summary(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let ideas = state.ideas.list(Some(identity.user_id)).await?;
    Ok(HttpResponse::Ok().json(summary_response(pipeline::summarize(&ideas))))
}

/// GET /api/ideas/categories
pub async fn categories(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let ideas = state.ideas.list(Some(identity.user_id)).await?;
    let counts: Vec<CategoryCountResponse> = pipeline::category_counts(&ideas)
        .into_iter()
        .map(|c| CategoryCountResponse {
            category: c.category.to_string(),
            count: c.count,
        })
        .collect();

    Ok(HttpResponse::Ok().json(counts))
}

/// POST /api/ideas
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateIdeaRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_idea = NewIdea {
        title: req.title,
        description: req.description,
        excerpt: req.excerpt,
        category: parse_category(&req.category)?,
        tags: req.tags,
    };

    let idea = state.ideas.create(new_idea, Some(identity.user_id)).await?;
    Ok(HttpResponse::Created().json(idea_response(&idea)))
}

/// GET /api/ideas/{id}
pub async fn get(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let idea = state
        .ideas
        .get_by_id(id, Some(identity.user_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Idea with id {} not found", id)))?;

    Ok(HttpResponse::Ok().json(idea_response(&idea)))
}

/// PUT /api/ideas/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateIdeaRequest>,
) -> AppResult<HttpResponse> {
    let changes = idea_changes(body.into_inner())?;
    let idea = state
        .ideas
        .update(path.into_inner(), changes, Some(identity.user_id))
        .await?;

    Ok(HttpResponse::Ok().json(idea_response(&idea)))
}

/// POST /api/ideas/{id}/expand
///
/// Saves any supplied changes and marks the idea AI-expanded.
pub async fn expand(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: Option<web::Json<UpdateIdeaRequest>>,
) -> AppResult<HttpResponse> {
    let changes = match body {
        Some(body) => idea_changes(body.into_inner())?,
        None => IdeaChanges::default(),
    };
    let idea = state
        .ideas
        .expand(path.into_inner(), changes, Some(identity.user_id))
        .await?;

    Ok(HttpResponse::Ok().json(idea_response(&idea)))
}

/// DELETE /api/ideas/{id}
///
/// 204 whether or not anything was removed.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .ideas
        .delete(path.into_inner(), Some(identity.user_id))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

fn parse_category(label: &str) -> AppResult<Category> {
    label
        .parse()
        .map_err(|e: ideaslab_core::domain::UnknownCategory| AppError::BadRequest(e.to_string()))
}

fn list_query(params: ListIdeasParams) -> ListQuery {
    ListQuery {
        search: params.search.unwrap_or_default(),
        category: params
            .category
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or_default(),
        sort: params
            .sort
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
    }
}

fn idea_changes(req: UpdateIdeaRequest) -> AppResult<IdeaChanges> {
    let category = req.category.as_deref().map(parse_category).transpose()?;
    Ok(IdeaChanges {
        title: req.title,
        description: req.description,
        excerpt: req.excerpt,
        category,
        tags: req.tags,
        mark_ai_expanded: req.ai_expanded.unwrap_or(false),
    })
}

fn idea_response(idea: &Idea) -> IdeaResponse {
    IdeaResponse {
        id: idea.id,
        title: idea.title.clone(),
        description: idea.description.clone(),
        excerpt: idea.excerpt.clone(),
        category: idea.category.to_string(),
        tags: idea.tags.clone(),
        tag_list: idea.tag_list().into_iter().map(str::to_string).collect(),
        ai_expanded: idea.ai_expanded,
        created_at: idea.created_at,
        updated_at: idea.updated_at,
    }
}

fn card_response(idea: &Idea, now: DateTime<Utc>) -> IdeaCardResponse {
    IdeaCardResponse {
        id: idea.id,
        title: idea.title.clone(),
        excerpt: idea.preview(PREVIEW_CHARS),
        category: idea.category.to_string(),
        ai_expanded: idea.ai_expanded,
        date: pipeline::relative_date(idea.created_at, now).to_string(),
        created_at: idea.created_at,
    }
}

fn summary_response(summary: IdeaSummary) -> IdeaSummaryResponse {
    IdeaSummaryResponse {
        total: summary.total,
        ai_expanded: summary.ai_expanded,
        categories: summary
            .categories
            .into_iter()
            .map(|c| CategoryCountResponse {
                category: c.category.to_string(),
                count: c.count,
            })
            .collect(),
    }
}
