//! Use cases wired over the in-memory store, exercised end to end.

use std::sync::Arc;

use domains::{DomainError, LikeToggle, DELETED_COMMENT_PLACEHOLDER, DELETED_REPLY_PLACEHOLDER};
use serde_json::json;
use services::ForumUseCases;
use storage_adapters::MemoryForumStore;

fn forum() -> ForumUseCases {
    let store = MemoryForumStore::new();
    store.register_user("user-1", "dicoding");
    store.register_user("user-2", "johndoe");
    store.register_user("user-3", "janedoe");
    let store = Arc::new(store);
    ForumUseCases::new(store.clone(), store.clone(), store.clone(), store)
}

async fn thread(forum: &ForumUseCases, owner: &str) -> String {
    forum
        .add_thread
        .execute(&json!({ "title": "sebuah thread", "body": "sebuah body thread", "owner": owner }))
        .await
        .unwrap()
        .id
}

async fn comment(forum: &ForumUseCases, thread_id: &str, owner: &str, content: &str) -> String {
    forum
        .add_comment
        .execute(&json!({ "content": content, "threadId": thread_id, "owner": owner }))
        .await
        .unwrap()
        .id
}

async fn reply(
    forum: &ForumUseCases,
    thread_id: &str,
    comment_id: &str,
    owner: &str,
    content: &str,
) -> String {
    forum
        .add_reply
        .execute(&json!({
            "content": content,
            "threadId": thread_id,
            "commentId": comment_id,
            "owner": owner,
        }))
        .await
        .unwrap()
        .id
}

async fn toggle(
    forum: &ForumUseCases,
    thread_id: &str,
    comment_id: &str,
    owner: &str,
) -> LikeToggle {
    forum
        .toggle_like
        .execute(&json!({ "threadId": thread_id, "commentId": comment_id, "owner": owner }))
        .await
        .unwrap()
}

#[tokio::test]
async fn thread_detail_aggregates_comments_replies_and_likes() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;
    let c1 = comment(&forum, &t1, "user-2", "sebuah comment").await;
    let r1 = reply(&forum, &t1, &c1, "user-1", "sebuah balasan").await;
    assert_eq!(toggle(&forum, &t1, &c1, "user-3").await, LikeToggle::Liked);

    let detail = forum.get_thread.execute(&json!({ "threadId": t1 })).await.unwrap();

    assert_eq!(detail.id, t1);
    assert_eq!(detail.username, "dicoding");
    assert_eq!(detail.comments.len(), 1);
    let c = &detail.comments[0];
    assert_eq!(c.id, c1);
    assert_eq!(c.username, "johndoe");
    assert_eq!(c.content, "sebuah comment");
    assert_eq!(c.like_count, 1);
    assert_eq!(c.replies.len(), 1);
    assert_eq!(c.replies[0].id, r1);
    assert_eq!(c.replies[0].username, "dicoding");
    assert_eq!(c.replies[0].content, "sebuah balasan");
}

#[tokio::test]
async fn detail_serializes_with_camel_case_like_count() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;
    comment(&forum, &t1, "user-2", "hai").await;

    let detail = forum.get_thread.execute(&json!({ "threadId": t1 })).await.unwrap();
    let value = serde_json::to_value(&detail).unwrap();

    assert_eq!(value["comments"][0]["likeCount"], json!(0));
    assert_eq!(value["comments"][0]["replies"], json!([]));
    assert!(value["comments"][0].get("isDeleted").is_none());
}

#[tokio::test]
async fn toggling_alternates_between_liked_and_unliked() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;
    let c1 = comment(&forum, &t1, "user-2", "hai").await;

    assert_eq!(toggle(&forum, &t1, &c1, "user-3").await, LikeToggle::Liked);
    assert_eq!(toggle(&forum, &t1, &c1, "user-3").await, LikeToggle::Unliked);
    let detail = forum.get_thread.execute(&json!({ "threadId": t1 })).await.unwrap();
    assert_eq!(detail.comments[0].like_count, 0);

    assert_eq!(toggle(&forum, &t1, &c1, "user-3").await, LikeToggle::Liked);
    assert_eq!(toggle(&forum, &t1, &c1, "user-2").await, LikeToggle::Liked);
    let detail = forum.get_thread.execute(&json!({ "threadId": t1 })).await.unwrap();
    assert_eq!(detail.comments[0].like_count, 2);
}

#[tokio::test]
async fn deleted_comment_is_masked_but_keeps_its_replies() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;
    let c1 = comment(&forum, &t1, "user-2", "rahasia").await;
    reply(&forum, &t1, &c1, "user-3", "balasan tetap ada").await;

    forum
        .delete_comment
        .execute(&json!({ "threadId": t1, "commentId": c1, "owner": "user-2" }))
        .await
        .unwrap();

    let detail = forum.get_thread.execute(&json!({ "threadId": t1 })).await.unwrap();
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].content, DELETED_COMMENT_PLACEHOLDER);
    assert_eq!(detail.comments[0].replies.len(), 1);
    assert_eq!(detail.comments[0].replies[0].content, "balasan tetap ada");
}

#[tokio::test]
async fn deleted_comment_still_accepts_replies_and_likes() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;
    let c1 = comment(&forum, &t1, "user-2", "hai").await;
    forum
        .delete_comment
        .execute(&json!({ "threadId": t1, "commentId": c1, "owner": "user-2" }))
        .await
        .unwrap();

    reply(&forum, &t1, &c1, "user-1", "masih bisa").await;
    assert_eq!(toggle(&forum, &t1, &c1, "user-1").await, LikeToggle::Liked);
}

#[tokio::test]
async fn deleted_reply_is_masked_and_cannot_be_deleted_again() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;
    let c1 = comment(&forum, &t1, "user-2", "hai").await;
    let r1 = reply(&forum, &t1, &c1, "user-3", "rahasia").await;
    let payload = json!({ "threadId": t1, "commentId": c1, "replyId": r1, "owner": "user-3" });

    forum.delete_reply.execute(&payload).await.unwrap();

    let detail = forum.get_thread.execute(&json!({ "threadId": t1 })).await.unwrap();
    assert_eq!(detail.comments[0].replies[0].content, DELETED_REPLY_PLACEHOLDER);

    let err = forum.delete_reply.execute(&payload).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn only_the_owner_may_delete_a_comment() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;
    let c1 = comment(&forum, &t1, "user-2", "hai").await;

    let err = forum
        .delete_comment
        .execute(&json!({ "threadId": t1, "commentId": c1, "owner": "user-3" }))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Authorization(_)));

    let detail = forum.get_thread.execute(&json!({ "threadId": t1 })).await.unwrap();
    assert_eq!(detail.comments[0].content, "hai");
}

#[tokio::test]
async fn missing_comment_is_reported_before_ownership() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;

    let err = forum
        .delete_comment
        .execute(&json!({ "threadId": t1, "commentId": "comment-nope", "owner": "user-3" }))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn comment_from_another_thread_is_not_found() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;
    let t2 = thread(&forum, "user-1").await;
    let c1 = comment(&forum, &t1, "user-2", "hai").await;

    let err = forum
        .add_reply
        .execute(&json!({ "content": "x", "threadId": t2, "commentId": c1, "owner": "user-1" }))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn only_the_owner_may_delete_a_reply() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;
    let c1 = comment(&forum, &t1, "user-2", "hai").await;
    let r1 = reply(&forum, &t1, &c1, "user-3", "balasan").await;

    let err = forum
        .delete_reply
        .execute(&json!({ "threadId": t1, "commentId": c1, "replyId": r1, "owner": "user-2" }))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Authorization(_)));
}

#[tokio::test]
async fn replies_are_grouped_under_their_comment_in_order() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;
    let c1 = comment(&forum, &t1, "user-2", "pertama").await;
    let c2 = comment(&forum, &t1, "user-3", "kedua").await;
    let r1 = reply(&forum, &t1, &c1, "user-1", "a").await;
    let r2 = reply(&forum, &t1, &c2, "user-1", "b").await;
    let r3 = reply(&forum, &t1, &c1, "user-1", "c").await;

    let detail = forum.get_thread.execute(&json!({ "threadId": t1 })).await.unwrap();

    let ids: Vec<_> = detail.comments.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec![c1, c2]);
    let first: Vec<_> = detail.comments[0].replies.iter().map(|r| r.id.clone()).collect();
    assert_eq!(first, vec![r1, r3]);
    let second: Vec<_> = detail.comments[1].replies.iter().map(|r| r.id.clone()).collect();
    assert_eq!(second, vec![r2]);
}

#[tokio::test]
async fn unknown_thread_is_not_found_everywhere() {
    let forum = forum();

    let err = forum.get_thread.execute(&json!({ "threadId": "thread-nope" })).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    let err = forum
        .add_comment
        .execute(&json!({ "content": "x", "threadId": "thread-nope", "owner": "user-1" }))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn invalid_payload_is_rejected_without_side_effects() {
    let forum = forum();
    let t1 = thread(&forum, "user-1").await;

    let err = forum
        .add_comment
        .execute(&json!({ "content": 123, "threadId": t1, "owner": "user-1" }))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let detail = forum.get_thread.execute(&json!({ "threadId": t1 })).await.unwrap();
    assert!(detail.comments.is_empty());
}
