use super::*;

#[test]
fn defaults_cover_everything_but_database_url() {
    std::env::set_var("TEAMUP__DATABASE__URL", "sqlite::memory:");

    let settings = Settings::new().unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.database.url, "sqlite::memory:");
    assert_eq!(settings.database.max_connections, Some(100));
    assert_eq!(settings.mail.base_url, "http://localhost:8025");
    assert_eq!(settings.sweep.interval_secs, 3600);
    assert_eq!(settings.metrics.port, 9000);
}
