use milkstore_admin::models::config::AdminConfig;

#[test]
fn test_admin_config_loads_from_yaml_with_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("admin.yaml");
    std::fs::write(
        &path,
        "api_base_url: https://api.example.com/admin\n",
    )
    .expect("write config");

    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .build()
        .expect("build config");
    let admin_config: AdminConfig = settings.try_deserialize().expect("deserialize");

    assert_eq!(admin_config.api_base_url, "https://api.example.com/admin");
    assert_eq!(admin_config.session_cookie, None);
    assert_eq!(admin_config.items_per_page, 10);
}

#[test]
fn test_admin_config_honors_explicit_values() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("admin.yaml");
    std::fs::write(
        &path,
        "api_base_url: http://localhost:3000\nsession_cookie: session=abc123\nitems_per_page: 25\n",
    )
    .expect("write config");

    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .build()
        .expect("build config");
    let admin_config: AdminConfig = settings.try_deserialize().expect("deserialize");

    assert_eq!(admin_config.session_cookie.as_deref(), Some("session=abc123"));
    assert_eq!(admin_config.items_per_page, 25);
}
