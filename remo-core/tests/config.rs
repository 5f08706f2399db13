use remo_core::AppConfig;

#[test]
fn defaults_are_usable_without_a_file() {
    let config = AppConfig::default();
    assert_eq!(config.docs.path, "/docs");
    assert_eq!(config.docs.options.swagger, "2.0");
    assert_eq!(config.docs.options.base_path, "/");
    assert_eq!(config.auth.expires_in, 3600);
    assert_eq!(config.auth.default_roles, vec!["user".to_string()]);
    assert!(!config.auth.enable_basic_auth);
}

#[test]
fn yaml_overrides_defaults() {
    let config = AppConfig::from_yaml_str(
        r#"
docs:
  path: /swagger
  options:
    host: api.example.com
    info:
      title: Cats API
      version: 1.0.0
auth:
  secret: s3cret
  expiresIn: 7200
  enableBasicAuth: true
  defaultRoles:
    - user
    - beta
"#,
    )
    .unwrap();

    assert_eq!(config.docs.path, "/swagger");
    assert_eq!(config.docs.options.host, "api.example.com");
    assert_eq!(config.docs.options.info.title, "Cats API");
    // unset keys keep their defaults
    assert_eq!(config.docs.options.swagger, "2.0");
    assert_eq!(config.auth.secret, "s3cret");
    assert_eq!(config.auth.expires_in, 7200);
    assert!(config.auth.enable_basic_auth);
    assert_eq!(config.auth.default_roles.len(), 2);
}

#[test]
fn error_messages_are_overridable() {
    let config = AppConfig::from_yaml_str(
        r#"
auth:
  messages:
    errors:
      no_permission: "Nope"
"#,
    )
    .unwrap();
    assert_eq!(config.auth.messages.errors.no_permission, "Nope");
    assert_eq!(config.auth.messages.errors.unauthorized, "Unauthorized");
}

#[test]
fn invalid_yaml_is_a_parse_error() {
    let err = AppConfig::from_yaml_str("docs: [not, a, map]").unwrap_err();
    assert!(err.to_string().contains("parse"));
}
