/// Integration tests for the forum view controller
/// Drives `ForumView` against the real services over an in-memory store
mod common;

#[cfg(test)]
mod tests {
    use crate::common::{InMemoryForumRepository, InProcessForumApi, ALICE, BOB};
    use forum_service::db::ForumRepository;
    use forum_service::models::Actor;
    use forum_service::view::ForumView;

    fn alice() -> Actor {
        Actor::new(ALICE, "user")
    }

    fn bob() -> Actor {
        Actor::new(BOB, "user")
    }

    async fn mounted(
        repo: &InMemoryForumRepository,
        actor: Option<Actor>,
    ) -> ForumView<InProcessForumApi> {
        let mut view = ForumView::new(InProcessForumApi::new(repo.clone(), actor));
        view.mount().await;
        view
    }

    #[tokio::test]
    async fn test_mount_loads_posts_and_actor() {
        let repo = InMemoryForumRepository::with_default_users();
        repo.create_post(ALICE, "Rain", "Heavy rain today")
            .await
            .unwrap();

        let view = mounted(&repo, Some(alice())).await;

        assert_eq!(view.state().posts.len(), 1);
        assert_eq!(view.state().posts[0].title, "Rain");
        assert_eq!(view.state().actor, Some(alice()));
        assert_eq!(view.api().list_calls(), 1);
        assert!(view.state().alert.is_none());
    }

    #[tokio::test]
    async fn test_anonymous_view_has_no_controls() {
        let repo = InMemoryForumRepository::with_default_users();
        let post = repo
            .create_post(ALICE, "Rain", "Heavy rain today")
            .await
            .unwrap();

        let view = mounted(&repo, None).await;

        assert!(view.state().actor.is_none());
        assert!(!view.state().can_modify(post.user_id));
    }

    #[tokio::test]
    async fn test_submit_post_refetches_and_clears_draft() {
        let repo = InMemoryForumRepository::with_default_users();
        let mut view = mounted(&repo, Some(alice())).await;

        view.set_new_post("Rain", "Heavy rain today");
        assert!(view.submit_post().await);

        assert_eq!(view.api().list_calls(), 2);
        assert_eq!(view.state().posts.len(), 1);
        assert_eq!(view.state().posts[0].author.name, "alice");
        assert!(view.state().new_post.title.is_empty());
        assert_eq!(repo.post_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_drafts_are_not_sent() {
        let repo = InMemoryForumRepository::with_default_users();
        let post = repo
            .create_post(ALICE, "Rain", "Heavy rain today")
            .await
            .unwrap();
        let mut view = mounted(&repo, Some(alice())).await;

        view.set_new_post("Rain", "   ");
        assert!(!view.submit_post().await);

        view.set_comment_draft(post.id, "");
        assert!(!view.submit_comment(post.id).await);

        assert_eq!(view.api().mutation_calls(), 0);
        assert_eq!(view.api().list_calls(), 1);
        assert_eq!(repo.post_count(), 1);
        assert_eq!(repo.comment_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_edits_are_not_sent() {
        let repo = InMemoryForumRepository::with_default_users();
        let post = repo
            .create_post(ALICE, "Rain", "Heavy rain today")
            .await
            .unwrap();
        let comment = repo
            .create_comment(post.id, ALICE, "update soon")
            .await
            .unwrap();
        let mut view = mounted(&repo, Some(alice())).await;

        assert!(view.start_post_edit(post.id));
        view.set_post_edit("  ", "Rain has stopped");
        assert!(!view.save_post_edit().await);
        view.set_post_edit("Rain", "");
        assert!(!view.save_post_edit().await);

        assert!(view.start_comment_edit(comment.id));
        view.set_comment_edit(" \t ");
        assert!(!view.save_comment_edit().await);

        assert_eq!(view.api().mutation_calls(), 0);
        assert_eq!(view.api().list_calls(), 1);
        assert!(view.state().alert.is_none());
        assert_eq!(
            view.state().editing_post.as_ref().map(|e| e.content.as_str()),
            Some("")
        );
        assert!(view.state().editing_comment.is_some());
        assert_eq!(view.state().posts[0].content, "Heavy rain today");
        assert_eq!(view.state().posts[0].comments[0].content, "update soon");
    }

    #[tokio::test]
    async fn test_comment_submission_clears_only_that_draft() {
        let repo = InMemoryForumRepository::with_default_users();
        let first = repo.create_post(ALICE, "Rain", "Heavy").await.unwrap();
        let second = repo.create_post(ALICE, "Wind", "Gusty").await.unwrap();
        let mut view = mounted(&repo, Some(bob())).await;

        view.set_comment_draft(first.id, "stay dry");
        view.set_comment_draft(second.id, "hold on to your hat");
        assert!(view.submit_comment(first.id).await);

        assert_eq!(view.state().comment_draft(first.id), "");
        assert_eq!(view.state().comment_draft(second.id), "hold on to your hat");

        let listed = view.state().post(first.id).unwrap();
        assert_eq!(listed.comments.len(), 1);
        assert_eq!(listed.comments[0].content, "stay dry");
        assert_eq!(listed.comments[0].author.name, "bob");
    }

    #[tokio::test]
    async fn test_forbidden_edit_alerts_and_keeps_state() {
        let repo = InMemoryForumRepository::with_default_users();
        let post = repo
            .create_post(ALICE, "Rain", "Heavy rain today")
            .await
            .unwrap();
        let mut view = mounted(&repo, Some(bob())).await;

        assert!(view.start_post_edit(post.id));
        view.set_post_edit("Hacked", "mine now");
        assert!(!view.save_post_edit().await);

        let alert = view.state().alert.clone().unwrap();
        assert!(alert.starts_with("Forbidden"));
        assert_eq!(view.state().posts[0].title, "Rain");
        assert_eq!(
            view.state().editing_post.as_ref().map(|e| e.title.as_str()),
            Some("Hacked")
        );
        assert_eq!(view.api().list_calls(), 1);
    }

    #[tokio::test]
    async fn test_owner_edit_round_trip() {
        let repo = InMemoryForumRepository::with_default_users();
        let post = repo
            .create_post(ALICE, "Rain", "Heavy rain today")
            .await
            .unwrap();
        let comment = repo
            .create_comment(post.id, ALICE, "update soon")
            .await
            .unwrap();
        let mut view = mounted(&repo, Some(alice())).await;

        assert!(view.start_post_edit(post.id));
        assert!(view.start_comment_edit(comment.id));

        view.set_post_edit("Rain", "Rain has stopped");
        assert!(view.save_post_edit().await);
        assert!(view.state().editing_post.is_none());
        assert!(view.state().editing_comment.is_some());
        assert_eq!(view.state().posts[0].content, "Rain has stopped");
        assert!(view.state().posts[0].updated_at.is_some());

        view.set_comment_edit("sun is out");
        assert!(view.save_comment_edit().await);
        assert!(view.state().editing_comment.is_none());
        assert_eq!(view.state().posts[0].comments[0].content, "sun is out");
        assert_eq!(view.api().list_calls(), 3);
    }

    #[tokio::test]
    async fn test_delete_post_removes_it_and_its_comments_from_view() {
        let repo = InMemoryForumRepository::with_default_users();
        let post = repo
            .create_post(ALICE, "Rain", "Heavy rain today")
            .await
            .unwrap();
        let comment = repo.create_comment(post.id, BOB, "nice").await.unwrap();
        let mut view = mounted(&repo, Some(alice())).await;
        view.set_comment_draft(post.id, "half-written");
        view.toggle_like(post.id);

        assert!(view.delete_post(post.id).await);

        assert!(view.state().posts.is_empty());
        assert!(view.state().comment(comment.id).is_none());
        assert_eq!(view.state().comment_draft(post.id), "");
        assert!(!view.state().is_liked(post.id));

        assert!(!view.delete_post(post.id).await);
        assert!(view.state().alert.as_deref().unwrap().starts_with("Not found"));
    }

    #[tokio::test]
    async fn test_like_is_local_only() {
        let repo = InMemoryForumRepository::with_default_users();
        let post = repo
            .create_post(ALICE, "Rain", "Heavy rain today")
            .await
            .unwrap();
        let mut view = mounted(&repo, Some(bob())).await;

        assert!(view.toggle_like(post.id));
        assert!(view.state().is_liked(post.id));
        assert!(!view.toggle_like(post.id));

        assert_eq!(view.api().mutation_calls(), 0);
        assert_eq!(view.api().list_calls(), 1);
    }

    #[tokio::test]
    async fn test_comment_delete_by_admin_refetches() {
        let repo = InMemoryForumRepository::with_default_users();
        let post = repo
            .create_post(ALICE, "Rain", "Heavy rain today")
            .await
            .unwrap();
        let comment = repo.create_comment(post.id, BOB, "spam").await.unwrap();
        let mut view = mounted(&repo, Some(Actor::new(99, "admin"))).await;

        assert!(view.state().can_modify(comment.user_id));
        assert!(view.delete_comment(comment.id).await);
        assert!(view.state().posts[0].comments.is_empty());
        assert_eq!(view.api().list_calls(), 2);
    }
}
