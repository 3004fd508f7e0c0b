use oru_config::{ConnectOverrides, ConnectSettings, ENV_HOST, ENV_PORT, ENV_SERVICE};

#[test]
fn scenario_defaults_match_stock_local_listener() {
    let s = ConnectSettings::default();
    assert_eq!(s.host, "127.0.0.1");
    assert_eq!(s.port, 1521);
    assert_eq!(s.username, "SYSTEM");
    assert_eq!(s.password, "manager");
    assert_eq!(s.service, "ORCL");
}

#[test]
fn scenario_env_lookup_overrides_defaults_field_by_field() {
    let s = ConnectSettings::from_lookup(|key| match key {
        k if k == ENV_HOST => Some("db01.internal".to_string()),
        k if k == ENV_PORT => Some("1522".to_string()),
        _ => None,
    });

    assert_eq!(s.host, "db01.internal");
    assert_eq!(s.port, 1522);
    // Untouched fields keep their defaults.
    assert_eq!(s.username, "SYSTEM");
    assert_eq!(s.service, "ORCL");
}

#[test]
fn scenario_malformed_port_falls_back_to_default() {
    let s = ConnectSettings::from_lookup(|key| {
        (key == ENV_PORT).then(|| "listener".to_string())
    });
    assert_eq!(s.port, 1521);
}

#[test]
fn scenario_cli_overrides_beat_env_values() {
    let mut s = ConnectSettings::from_lookup(|key| {
        (key == ENV_SERVICE).then(|| "ORCLPDB1".to_string())
    });
    assert_eq!(s.service, "ORCLPDB1");

    s.apply_overrides(&ConnectOverrides {
        service: Some("XEPDB1".to_string()),
        port: Some(1523),
        ..Default::default()
    });

    assert_eq!(s.service, "XEPDB1");
    assert_eq!(s.port, 1523);
    assert_eq!(s.host, "127.0.0.1");
}

#[test]
fn scenario_dsn_is_easy_connect_format() {
    let mut s = ConnectSettings::default();
    s.host = "db01".to_string();
    s.service = "XEPDB1".to_string();
    assert_eq!(s.dsn(), "//db01:1521/XEPDB1");
}
