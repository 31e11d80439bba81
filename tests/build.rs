//! End-to-end build tests over a real site tree on disk.

use prosa::{build::build_site, config::SiteConfig, meta::MetaError};
use std::{fs, path::Path};
use tempfile::TempDir;

fn site() -> (TempDir, SiteConfig) {
    let dir = TempDir::new().unwrap();
    let mut config = SiteConfig::default();
    config.root = dir.path().to_path_buf();
    config.base.title = "Cuaderno".into();
    config.base.url = Some("https://cuaderno.example".into());
    fs::create_dir_all(config.posts_dir()).unwrap();
    fs::create_dir_all(config.pages_dir()).unwrap();
    (dir, config)
}

fn write_content(dir: &Path, file: &str, front: &str, body: &str) {
    fs::write(dir.join(file), format!("---\n{front}---\n\n{body}\n")).unwrap();
}

fn populate(config: &SiteConfig) {
    write_content(
        &config.posts_dir(),
        "hello.md",
        "title: Hello World\ndate: 2020-04-01\ncategory: Essays\ntags: rust, web\nsummary: A greeting\n",
        "First post body.",
    );
    write_content(
        &config.posts_dir(),
        "segunda.md",
        "titulo: Segunda Entrada\nfecha: 2020-04-02\netiquetas: rust\n",
        "Cuerpo en castellano.",
    );
    write_content(
        &config.posts_dir(),
        "secret.md",
        "title: Secret Draft\ndate: 2020-04-03\nprivate: yes\n",
        "Not for the public.",
    );
    write_content(
        &config.pages_dir(),
        "about.md",
        "title: About\n",
        "About this site.",
    );
    write_content(
        &config.pages_dir(),
        "hidden.md",
        "title: Hidden Page\nnavigation: no\n",
        "Linked nowhere.",
    );
}

#[test]
fn full_build_produces_expected_tree() {
    let (_dir, config) = site();
    populate(&config);

    let updated = build_site(&config).unwrap();
    assert!(updated > 0);

    let deploy = config.deploy_dir();
    for path in [
        "index.html",
        "posts/essays/2020/04/01/hello-world/index.html",
        "posts/miscellaneous/2020/04/02/segunda-entrada/index.html",
        "posts/miscellaneous/2020/04/03/secret-draft/index.html",
        "about/index.html",
        "hidden-page/index.html",
        "archive/index.html",
        "categories/index.html",
        "categories/essays/index.html",
        "tags/index.html",
        "tags/rust/index.html",
        "tags/web/index.html",
        "feed.xml",
    ] {
        assert!(deploy.join(path).is_file(), "missing {path}");
    }
}

#[test]
fn private_entries_stay_out_of_aggregated_views() {
    let (_dir, config) = site();
    populate(&config);
    build_site(&config).unwrap();

    let deploy = config.deploy_dir();
    for view in ["index.html", "archive/index.html", "feed.xml"] {
        let content = fs::read_to_string(deploy.join(view)).unwrap();
        assert!(
            !content.contains("Secret Draft"),
            "private entry leaked into {view}"
        );
    }

    // The entry page itself exists
    assert!(
        deploy
            .join("posts/miscellaneous/2020/04/03/secret-draft/index.html")
            .is_file()
    );
}

#[test]
fn navigation_links_appear_on_every_rendered_page() {
    let (_dir, config) = site();
    populate(&config);
    build_site(&config).unwrap();

    let deploy = config.deploy_dir();
    for page in [
        "index.html",
        "archive/index.html",
        "posts/essays/2020/04/01/hello-world/index.html",
    ] {
        let html = fs::read_to_string(deploy.join(page)).unwrap();
        assert!(html.contains(r#"href="/about""#), "no nav link in {page}");
        assert!(!html.contains("Hidden Page"), "opted-out page in {page} nav");
    }
}

#[test]
fn localized_aliases_resolve_like_english_ones() {
    let (_dir, config) = site();
    populate(&config);
    build_site(&config).unwrap();

    let home =
        fs::read_to_string(config.deploy_dir().join("index.html")).unwrap();
    assert!(home.contains("Segunda Entrada"));

    let rust_tag =
        fs::read_to_string(config.deploy_dir().join("tags/rust/index.html")).unwrap();
    assert!(rust_tag.contains("Segunda Entrada"));
    assert!(rust_tag.contains("Hello World"));
}

#[test]
fn second_build_rewrites_nothing() {
    let (_dir, config) = site();
    populate(&config);

    assert!(build_site(&config).unwrap() > 0);
    assert_eq!(build_site(&config).unwrap(), 0);
}

#[test]
fn changed_source_rewrites_only_affected_output() {
    let (_dir, config) = site();
    populate(&config);
    build_site(&config).unwrap();

    write_content(
        &config.pages_dir(),
        "about.md",
        "title: About\n",
        "A different about text.",
    );

    let updated = build_site(&config).unwrap();
    assert!(updated >= 1);

    let about =
        fs::read_to_string(config.deploy_dir().join("about/index.html")).unwrap();
    assert!(about.contains("A different about text."));
}

#[test]
fn pagination_splits_home_into_ceil_n_over_p_pages() {
    let (_dir, mut config) = site();
    config.build.max_entries = 3;
    for day in 1..=7 {
        write_content(
            &config.posts_dir(),
            &format!("p{day}.md"),
            &format!("title: Post Number {day}\ndate: 2020-04-{day:02}\n"),
            "body",
        );
    }

    build_site(&config).unwrap();

    let deploy = config.deploy_dir();
    assert!(deploy.join("index.html").is_file());
    assert!(deploy.join("page/2/index.html").is_file());
    assert!(deploy.join("page/3/index.html").is_file());
    assert!(!deploy.join("page/4/index.html").exists());

    // Every public entry appears exactly once across all pages
    let all = [
        fs::read_to_string(deploy.join("index.html")).unwrap(),
        fs::read_to_string(deploy.join("page/2/index.html")).unwrap(),
        fs::read_to_string(deploy.join("page/3/index.html")).unwrap(),
    ]
    .join("");
    for day in 1..=7 {
        assert_eq!(
            all.matches(&format!(">Post Number {day}<")).count(),
            1,
            "entry {day} not on exactly one page"
        );
    }
}

#[test]
fn empty_site_builds_with_root_index() {
    let (_dir, config) = site();

    build_site(&config).unwrap();

    assert!(config.deploy_dir().join("index.html").is_file());
    assert!(config.deploy_dir().join("feed.xml").is_file());
}

#[test]
fn missing_title_aborts_the_build() {
    let (_dir, config) = site();
    write_content(&config.posts_dir(), "broken.md", "date: 2020-04-01\n", "x");

    let err = build_site(&config).unwrap_err();
    assert!(
        err.chain()
            .any(|cause| matches!(
                cause.downcast_ref::<MetaError>(),
                Some(MetaError::MissingTitle(_))
            ))
    );
    // Fatal before any output for that input
    assert!(!config.deploy_dir().join("posts").exists());
}

#[test]
fn bad_date_aborts_the_build() {
    let (_dir, config) = site();
    write_content(
        &config.posts_dir(),
        "broken.md",
        "title: T\ndate: next tuesday\n",
        "x",
    );

    let err = build_site(&config).unwrap_err();
    assert!(
        err.chain()
            .any(|cause| matches!(
                cause.downcast_ref::<MetaError>(),
                Some(MetaError::BadDate(_, _))
            ))
    );
}

#[test]
fn static_assets_and_extra_dirs_are_copied() {
    let (_dir, mut config) = site();
    populate(&config);
    fs::create_dir_all(config.static_dir()).unwrap();
    fs::write(config.static_dir().join("style.css"), "body { margin: 0 }").unwrap();
    fs::create_dir_all(config.root.join("downloads")).unwrap();
    fs::write(config.root.join("downloads/paper.pdf"), "pdf bytes").unwrap();
    config.build.extra_dirs = vec!["downloads".into()];

    build_site(&config).unwrap();

    assert!(config.deploy_dir().join("static/style.css").is_file());
    assert!(!config.deploy_dir().join("style.css").exists());
    assert!(config.deploy_dir().join("downloads/paper.pdf").is_file());

    let home = fs::read_to_string(config.deploy_dir().join("index.html")).unwrap();
    assert!(home.contains(r#"href="/static/style.css""#));
}

#[test]
fn base_path_prefixes_the_deploy_tree_and_uris() {
    let (_dir, mut config) = site();
    config.base.base_path = "blog".into();
    populate(&config);

    build_site(&config).unwrap();

    let deploy = config.deploy_dir();
    assert!(deploy.ends_with("_build/blog"));
    assert!(deploy.join("index.html").is_file());

    let home = fs::read_to_string(deploy.join("index.html")).unwrap();
    assert!(home.contains(r#"href="/blog/posts/essays/2020/04/01/hello-world""#));
}
