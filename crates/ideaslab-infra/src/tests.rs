//! Access-layer scenarios against the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use uuid::Uuid;

use ideaslab_core::domain::{Category, Idea, IdeaChanges, NewIdea};
use ideaslab_core::error::{IdeaError, WriteError};
use ideaslab_core::ports::{PubSub, message_handler};
use ideaslab_core::services::{BackfillPolicy, ChangeKind, IDEA_CHANGES_CHANNEL, IdeaAccess, IdeaChange};

use crate::{InMemoryIdeaRepository, InMemoryPubSub};

fn legacy_idea(title: &str) -> Idea {
    let now = Utc::now();
    Idea {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: "from before accounts".to_string(),
        excerpt: None,
        category: Category::Other,
        tags: None,
        ai_expanded: false,
        created_at: now,
        updated_at: now,
        user_id: None,
    }
}

fn access(repo: &Arc<InMemoryIdeaRepository>, policy: BackfillPolicy) -> IdeaAccess {
    IdeaAccess::new(repo.clone(), policy)
}

#[tokio::test]
async fn test_end_to_end_ownership_scenario() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    let ideas = access(&repo, BackfillPolicy::default());
    let alice = Some(Uuid::new_v4());
    let bob = Some(Uuid::new_v4());

    let created = ideas
        .create(NewIdea::new("X", "Y", Category::Technology), alice)
        .await
        .unwrap();
    assert_eq!(created.user_id, alice);

    let fetched = ideas.get_by_id(created.id, alice).await.unwrap().unwrap();
    assert!(!fetched.ai_expanded);

    tokio::time::sleep(Duration::from_millis(5)).await;
    ideas
        .update(created.id, IdeaChanges::expanded(), alice)
        .await
        .unwrap();

    let expanded = ideas.get_by_id(created.id, alice).await.unwrap().unwrap();
    assert!(expanded.ai_expanded);
    assert!(expanded.updated_at > fetched.updated_at);
    assert_eq!(expanded.created_at, fetched.created_at);

    assert!(ideas.get_by_id(created.id, bob).await.unwrap().is_none());

    ideas.delete(created.id, bob).await.unwrap();
    assert_eq!(repo.snapshot().await.len(), 1);

    ideas.delete(created.id, alice).await.unwrap();
    assert!(ideas.get_by_id(created.id, alice).await.unwrap().is_none());
    assert!(ideas.get_by_id(created.id, bob).await.unwrap().is_none());
    assert!(repo.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_list_without_caller_is_empty() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    repo.insert_raw(legacy_idea("orphan")).await;
    let ideas = access(&repo, BackfillPolicy::default());

    assert!(ideas.list(None).await.unwrap().is_empty());
    // Nothing was claimed by the anonymous call.
    assert!(!ideas.backfill().is_complete());
    assert!(repo.snapshot().await[0].user_id.is_none());
}

#[tokio::test]
async fn test_other_operations_require_caller() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    let ideas = access(&repo, BackfillPolicy::default());
    let id = Uuid::new_v4();

    assert!(matches!(ideas.get_by_id(id, None).await, Err(IdeaError::Access)));
    assert!(matches!(
        ideas.create(NewIdea::new("X", "Y", Category::Other), None).await,
        Err(IdeaError::Access)
    ));
    assert!(matches!(
        ideas.update(id, IdeaChanges::default(), None).await,
        Err(IdeaError::Access)
    ));
    assert!(matches!(ideas.delete(id, None).await, Err(IdeaError::Access)));
}

#[tokio::test]
async fn test_list_is_owner_scoped_and_newest_first() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    let ideas = access(&repo, BackfillPolicy::Disabled);
    let alice = Some(Uuid::new_v4());
    let bob = Some(Uuid::new_v4());

    ideas.create(NewIdea::new("first", "a", Category::Health), alice).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    ideas.create(NewIdea::new("second", "b", Category::Health), alice).await.unwrap();
    ideas.create(NewIdea::new("bob's", "c", Category::Social), bob).await.unwrap();

    let listed = ideas.list(alice).await.unwrap();
    let titles: Vec<_> = listed.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test]
async fn test_backfill_claims_orphans_once() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    repo.insert_raw(legacy_idea("one")).await;
    repo.insert_raw(legacy_idea("two")).await;
    let ideas = access(&repo, BackfillPolicy::ClaimByFirstCaller);
    let alice = Some(Uuid::new_v4());

    let first = ideas.list(alice).await.unwrap();
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|i| i.user_id == alice));

    let owners_before: Vec<_> = repo.snapshot().await.iter().map(|i| i.user_id).collect();
    let second = ideas.list(alice).await.unwrap();
    let owners_after: Vec<_> = repo.snapshot().await.iter().map(|i| i.user_id).collect();

    let mut first_ids: Vec<_> = first.iter().map(|i| i.id).collect();
    let mut second_ids: Vec<_> = second.iter().map(|i| i.id).collect();
    first_ids.sort();
    second_ids.sort();
    assert_eq!(first_ids, second_ids);
    assert_eq!(owners_before, owners_after);
}

#[tokio::test]
async fn test_backfill_runs_at_most_once_per_process() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    let ideas = access(&repo, BackfillPolicy::ClaimByFirstCaller);
    let alice = Some(Uuid::new_v4());
    let bob = Some(Uuid::new_v4());

    ideas.list(alice).await.unwrap();
    assert!(ideas.backfill().is_complete());

    // Rows orphaned after the pass are left alone.
    let late = legacy_idea("late");
    let late_id = late.id;
    repo.insert_raw(late).await;

    assert!(ideas.get_by_id(late_id, bob).await.unwrap().is_none());
    assert!(repo.snapshot().await[0].user_id.is_none());
}

#[tokio::test]
async fn test_get_by_id_claims_legacy_row() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    let orphan = legacy_idea("orphan");
    let id = orphan.id;
    repo.insert_raw(orphan).await;
    let ideas = access(&repo, BackfillPolicy::default());
    let alice = Some(Uuid::new_v4());

    let claimed = ideas.get_by_id(id, alice).await.unwrap().unwrap();
    assert_eq!(claimed.user_id, alice);
}

#[tokio::test]
async fn test_concurrent_callers_do_not_share_orphans() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    for n in 0..5 {
        repo.insert_raw(legacy_idea(&format!("legacy {n}"))).await;
    }
    let ideas = Arc::new(access(&repo, BackfillPolicy::ClaimByFirstCaller));
    let alice = Some(Uuid::new_v4());
    let bob = Some(Uuid::new_v4());

    let (a, b) = tokio::join!(ideas.list(alice), ideas.list(bob));
    let (a, b) = (a.unwrap(), b.unwrap());

    // One caller wins every orphan; nobody gets a partial share.
    assert_eq!(a.len() + b.len(), 5);
    assert!(a.is_empty() || b.is_empty());
}

#[tokio::test]
async fn test_backfill_assigns_to_configured_owner() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    repo.insert_raw(legacy_idea("orphan")).await;
    let archivist = Uuid::new_v4();
    let ideas = access(&repo, BackfillPolicy::AssignTo(archivist));
    let alice = Some(Uuid::new_v4());

    assert!(ideas.list(alice).await.unwrap().is_empty());
    assert_eq!(ideas.list(Some(archivist)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_disabled_backfill_leaves_orphans_hidden() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    repo.insert_raw(legacy_idea("orphan")).await;
    let ideas = access(&repo, BackfillPolicy::Disabled);

    assert!(ideas.list(Some(Uuid::new_v4())).await.unwrap().is_empty());
    assert!(repo.snapshot().await[0].user_id.is_none());
}

#[tokio::test]
async fn test_create_validates_required_fields() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    let ideas = access(&repo, BackfillPolicy::Disabled);

    let result = ideas
        .create(NewIdea::new("", "Y", Category::Other), Some(Uuid::new_v4()))
        .await;

    assert!(matches!(
        result,
        Err(IdeaError::Write(WriteError::MissingField("title")))
    ));
    assert!(repo.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_update_foreign_idea_is_write_error() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    let ideas = access(&repo, BackfillPolicy::Disabled);
    let alice = Some(Uuid::new_v4());
    let created = ideas
        .create(NewIdea::new("X", "Y", Category::Business), alice)
        .await
        .unwrap();

    let changes = IdeaChanges {
        title: Some("hijacked".to_string()),
        ..IdeaChanges::default()
    };
    let result = ideas.update(created.id, changes, Some(Uuid::new_v4())).await;

    assert!(matches!(
        result,
        Err(IdeaError::Write(WriteError::NoMatchingRow(id))) if id == created.id
    ));
    assert_eq!(repo.snapshot().await[0].title, "X");
}

#[tokio::test]
async fn test_expand_marks_flag_and_saves_changes() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    let ideas = access(&repo, BackfillPolicy::Disabled);
    let alice = Some(Uuid::new_v4());
    let created = ideas
        .create(NewIdea::new("X", "Y", Category::Creative).with_tags("art, ai"), alice)
        .await
        .unwrap();

    let changes = IdeaChanges {
        description: Some("Expanded body".to_string()),
        ..IdeaChanges::default()
    };
    let expanded = ideas.expand(created.id, changes, alice).await.unwrap();

    assert!(expanded.ai_expanded);
    assert_eq!(expanded.description, "Expanded body");
    assert_eq!(expanded.tags.as_deref(), Some("art, ai"));
}

#[tokio::test]
async fn test_mutations_publish_changes() {
    let repo = Arc::new(InMemoryIdeaRepository::new());
    repo.insert_raw(legacy_idea("orphan")).await;
    let pubsub = Arc::new(InMemoryPubSub::default());
    let (tx, mut rx) = mpsc::unbounded_channel::<IdeaChange>();
    pubsub
        .subscribe(
            IDEA_CHANGES_CHANNEL,
            message_handler(move |msg| {
                let tx = tx.clone();
                async move {
                    if let Ok(change) = serde_json::from_str(&msg.payload) {
                        let _ = tx.send(change);
                    }
                }
            }),
        )
        .await
        .unwrap();

    let ideas = IdeaAccess::new(repo.clone(), BackfillPolicy::ClaimByFirstCaller)
        .with_notifier(pubsub.clone());
    let alice = Uuid::new_v4();

    ideas.list(Some(alice)).await.unwrap();
    let created = ideas
        .create(NewIdea::new("X", "Y", Category::Social), Some(alice))
        .await
        .unwrap();
    ideas.delete(created.id, Some(Uuid::new_v4())).await.unwrap();
    ideas.delete(created.id, Some(alice)).await.unwrap();

    let mut kinds = Vec::new();
    for _ in 0..3 {
        let change = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(change.owner, alice);
        kinds.push(change.kind);
    }
    assert_eq!(
        kinds,
        vec![ChangeKind::Claimed, ChangeKind::Created, ChangeKind::Deleted]
    );
}
