use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Repository, Signature};
use tempfile::tempdir;

use blogdex::config::Config;
use blogdex::fs::DiskFs;
use blogdex::model::{IndexStyle, Strategy, TimeZone};
use blogdex::pipeline::{reconcile_articles, render_index, write_outputs};
use blogdex::store::timestamps::TimestampStore;

fn commit_all(repo: &Repository) {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("blog", "blog@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, "articles", &tree, &parents)
        .unwrap();
}

fn git_config() -> Config {
    Config {
        strategy: Strategy::Git,
        timezone: TimeZone::Utc,
        base_url: "https://github.com/me/blog/blob/master".into(),
        ..Config::default()
    }
}

/// Run the whole pipeline once and persist its outputs.
fn update(root: &Path, config: &Config, now: i64) -> String {
    let reconciled = reconcile_articles(&DiskFs, root, config, now).unwrap();
    let index = render_index(&reconciled, config).unwrap();
    write_outputs(&DiskFs, root, config, &index, &reconciled.store).unwrap();
    index
}

fn cached(root: &Path) -> TimestampStore {
    TimestampStore::try_load(&DiskFs, &root.join("update.json"))
        .unwrap()
        .expect("cache written")
}

#[test]
fn git_strategy_keeps_first_seen_times_for_untouched_articles() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let repo = Repository::init(root).unwrap();
    fs::write(root.join("a.md"), "a").unwrap();
    fs::write(root.join("b.md"), "b").unwrap();
    commit_all(&repo);

    // First run: clean tree, no cache. Everything is stamped "now".
    update(root, &git_config(), 1_000);
    commit_all(&repo);
    let store = cached(root);
    assert_eq!(store.get("a.md"), Some(1_000));
    assert_eq!(store.get("b.md"), Some(1_000));

    // Edit one article and add another.
    fs::write(root.join("a.md"), "a, revised").unwrap();
    fs::write(root.join("c.md"), "c").unwrap();
    let index = update(root, &git_config(), 2_000);

    let store = cached(root);
    assert_eq!(store.get("a.md"), Some(2_000));
    assert_eq!(store.get("b.md"), Some(1_000));
    assert_eq!(store.get("c.md"), Some(2_000));
    assert_eq!(store.len(), 3);

    let rows: Vec<&str> = index.lines().filter(|l| l.starts_with("|[")).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("|[a.md]"));
    assert!(rows[1].starts_with("|[c.md]"));
    assert!(rows[2].starts_with("|[b.md]"));
    assert!(rows[2].ends_with("|1970-01-01 00:00:01|"));
}

#[test]
fn deleted_articles_disappear_from_cache_and_index() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let repo = Repository::init(root).unwrap();
    fs::write(root.join("keep.md"), "k").unwrap();
    fs::write(root.join("drop.md"), "d").unwrap();
    commit_all(&repo);
    update(root, &git_config(), 500);
    commit_all(&repo);

    fs::remove_file(root.join("drop.md")).unwrap();
    let index = update(root, &git_config(), 900);

    let store = cached(root);
    assert_eq!(store.get("drop.md"), None);
    assert_eq!(store.get("keep.md"), Some(500));
    assert!(!index.contains("drop.md"));
}

#[test]
fn docs_layout_uses_root_relative_keys_and_links() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let repo = Repository::init(root).unwrap();
    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("docs").join("hello world.md"), "hi").unwrap();
    fs::write(root.join("notes.md"), "not an article in docs mode").unwrap();
    commit_all(&repo);

    let config = Config {
        source_dir: Some("docs".into()),
        style: IndexStyle::List,
        ..git_config()
    };
    let index = update(root, &config, 42);

    assert_eq!(cached(root).get("docs/hello world.md"), Some(42));
    assert!(index.contains(
        "- [hello world.md](https://github.com/me/blog/blob/master/docs/hello%20world.md)"
    ));
    assert!(!index.contains("notes.md"));
}

#[test]
fn blog_in_repository_subdirectory_strips_prefix() {
    let dir = tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let root = dir.path().join("blog");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("old.md"), "old").unwrap();
    commit_all(&repo);

    let mut seeded = TimestampStore::new();
    seeded.insert("old.md", 10);
    seeded.save(&DiskFs, &root.join("update.json")).unwrap();
    commit_all(&repo);

    fs::write(root.join("old.md"), "edited").unwrap();
    update(&root, &git_config(), 20);
    assert_eq!(cached(&root).get("old.md"), Some(20));
}

#[test]
fn corrupt_cache_is_treated_as_first_run() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("x.md"), "x").unwrap();
    fs::write(root.join("update.json"), "not json at all").unwrap();
    let config = Config {
        strategy: Strategy::Mtime,
        timezone: TimeZone::Utc,
        ..Config::default()
    };

    let reconciled = reconcile_articles(&DiskFs, root, &config, 0).unwrap();
    assert_eq!(reconciled.records.len(), 1);
    assert_eq!(reconciled.changed, 1);
}

#[test]
fn readme_is_never_listed() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("post.md"), "p").unwrap();
    let config = Config {
        strategy: Strategy::Mtime,
        timezone: TimeZone::Utc,
        ..Config::default()
    };

    update(root, &config, 0);
    let index = update(root, &config, 0);
    assert!(index.contains("[post.md]"));
    assert!(!index.contains("[README.md]"));
}
