// Integration tests for the community feed and local identity

use anyhow::Result;
use pulseplan::errors::StoreError;
use pulseplan::storage::{FeedStore, Identity, LocalStorage};
use std::fs;
use tempfile::TempDir;

fn storage_in(dir: &TempDir) -> LocalStorage {
    LocalStorage::open(dir.path()).unwrap()
}

#[test]
fn test_like_toggle_scenario() -> Result<()> {
    let dir = TempDir::new()?;
    let mut feed = FeedStore::open(storage_in(&dir))?;
    assert!(feed.is_empty());

    assert!(feed.add_post("Ran 5k", "Alice")?);
    let post = &feed.posts()[0];
    assert_eq!(post.likes, 0);
    assert!(!post.liked);
    assert!(post.comments.is_empty());

    let post = feed.toggle_like(0)?;
    assert_eq!((post.likes, post.liked), (1, true));

    let post = feed.toggle_like(0)?;
    assert_eq!((post.likes, post.liked), (0, false));
    Ok(())
}

#[test]
fn test_blank_text_is_ignored() -> Result<()> {
    let dir = TempDir::new()?;
    let mut feed = FeedStore::open(storage_in(&dir))?;

    assert!(!feed.add_post("   ", "Alice")?);
    assert!(feed.is_empty());
    assert!(!dir.path().join("communityPosts.json").exists());

    feed.add_post("Leg day done", "Alice")?;
    assert!(!feed.add_comment(0, "", "Bob")?);
    assert!(!feed.add_comment(0, " \t\n", "Bob")?);
    assert!(feed.posts()[0].comments.is_empty());

    assert!(feed.add_comment(0, "Respect", "Bob")?);
    assert_eq!(feed.posts()[0].comments[0].sender, "Bob");
    Ok(())
}

#[test]
fn test_index_out_of_range() -> Result<()> {
    let dir = TempDir::new()?;
    let mut feed = FeedStore::open(storage_in(&dir))?;
    feed.add_post("Ran 5k", "Alice")?;

    assert!(matches!(
        feed.toggle_like(3),
        Err(StoreError::IndexOutOfRange { index: 3, len: 1 })
    ));
    assert!(matches!(
        feed.add_comment(1, "hi", "Bob"),
        Err(StoreError::IndexOutOfRange { index: 1, len: 1 })
    ));

    // Range is checked before the blank-text rule
    assert!(matches!(
        feed.add_comment(7, "", "Bob"),
        Err(StoreError::IndexOutOfRange { .. })
    ));

    let post = &feed.posts()[0];
    assert_eq!(post.likes, 0);
    assert!(post.comments.is_empty());
    Ok(())
}

#[test]
fn test_mutations_survive_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let mut feed = FeedStore::open(storage_in(&dir))?;
        feed.add_post("Ran 5k", "Alice")?;
        feed.add_post("First pull-up!", "Bob")?;
        feed.toggle_like(1)?;
        feed.add_comment(0, "Nice pace", "Bob")?;
    }

    let feed = FeedStore::open(storage_in(&dir))?;
    assert_eq!(feed.len(), 2);
    assert_eq!(feed.posts()[0].text, "Ran 5k");
    assert_eq!(feed.posts()[0].comments[0].text, "Nice pace");
    assert!(feed.posts()[1].liked);
    assert_eq!(feed.posts()[1].likes, 1);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("communityPosts.json"))?)?;
    assert_eq!(raw[1]["sender"], "Bob");
    assert_eq!(raw[0]["comments"][0]["sender"], "Bob");
    Ok(())
}

#[test]
fn test_posts_without_comments_field_load() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("communityPosts.json"),
        r#"[{"text":"Yoga at 6","sender":"Priya","likes":2,"liked":false}]"#,
    )?;

    let feed = FeedStore::open(storage_in(&dir))?;
    assert_eq!(feed.posts()[0].likes, 2);
    assert!(feed.posts()[0].comments.is_empty());
    Ok(())
}

#[test]
fn test_corrupt_feed() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("communityPosts.json"), "not json")?;

    assert!(matches!(
        FeedStore::open(storage_in(&dir)),
        Err(StoreError::CorruptStorage { .. })
    ));

    let mut feed = FeedStore::open_or_empty(storage_in(&dir));
    assert!(feed.is_empty());
    feed.add_post("Fresh start", "Alice")?;
    assert_eq!(FeedStore::open(storage_in(&dir))?.len(), 1);
    Ok(())
}

#[test]
fn test_identity() -> Result<()> {
    let dir = TempDir::new()?;
    let identity = Identity::new(storage_in(&dir));
    assert_eq!(identity.get()?, None);

    assert!(!identity.set("   ")?);
    assert_eq!(identity.get()?, None);

    assert!(identity.set("  Alice ")?);
    assert_eq!(Identity::new(storage_in(&dir)).get()?.as_deref(), Some("Alice"));
    Ok(())
}

#[test]
fn test_failed_write_leaves_feed_unchanged() -> Result<()> {
    let dir = TempDir::new()?;
    let mut feed = FeedStore::open(storage_in(&dir))?;
    feed.add_post("Ran 5k", "Alice")?;

    // A directory where the temp file should go makes every write fail
    fs::create_dir(dir.path().join("communityPosts.json.tmp"))?;

    assert!(matches!(
        feed.add_post("Second", "Alice"),
        Err(StoreError::StorageUnavailable(_))
    ));
    assert!(feed.toggle_like(0).is_err());
    assert!(feed.add_comment(0, "Nice", "Bob").is_err());

    let on_disk = FeedStore::open(storage_in(&dir))?;
    assert_eq!(feed.posts(), on_disk.posts());
    assert_eq!(feed.len(), 1);
    assert!(!feed.posts()[0].liked);
    assert_eq!(feed.posts()[0].likes, 0);
    assert!(feed.posts()[0].comments.is_empty());
    Ok(())
}
