// ABOUTME: Integration tests for configuration discovery and parsing.
// ABOUTME: Tests .env seeding from the template and API port resolution with its fallbacks.

use proptest::prelude::*;
use stackdeploy::config::*;
use std::fs;

mod seeding {
    use super::*;

    #[test]
    fn template_is_copied_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path()).unwrap();
        fs::write(layout.env_template(), "# edit me\nDB_URL=postgres://db\n").unwrap();

        let first = ensure_env_file(layout.env_file(), layout.env_template());
        assert_eq!(first, EnvFileStatus::Seeded);

        // User edits the seeded file; a second run must not overwrite it.
        fs::write(layout.env_file(), "API_PORT=9400\n").unwrap();
        let second = ensure_env_file(layout.env_file(), layout.env_template());
        assert_eq!(second, EnvFileStatus::Present);
        assert_eq!(
            fs::read_to_string(layout.env_file()).unwrap(),
            "API_PORT=9400\n"
        );
    }

    #[test]
    fn seeded_template_without_port_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path()).unwrap();
        fs::write(layout.env_template(), "DB_URL=postgres://db\n").unwrap();

        ensure_env_file(layout.env_file(), layout.env_template());

        let setting = resolve_port(layout.env_file());
        assert_eq!(setting.port, DEFAULT_API_PORT);
        assert_eq!(
            setting.source,
            PortSource::Default(DefaultReason::MissingKey)
        );
    }

    #[test]
    fn copy_failure_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join(".env.example");
        fs::write(&template, "API_PORT=9000\n").unwrap();

        // Parent directory of the target does not exist.
        let target = dir.path().join("missing").join(".env");
        let status = ensure_env_file(&target, &template);

        assert!(matches!(status, EnvFileStatus::SeedFailed(_)));
    }
}

mod port {
    use super::*;

    fn port_in_file(content: &str) -> u16 {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, content).unwrap();
        load_port(&path)
    }

    #[test]
    fn reads_port_with_or_without_quotes_and_spaces() {
        for content in [
            "API_PORT=9090\n",
            "API_PORT=\"9090\"\n",
            "API_PORT='9090'\n",
            "  API_PORT = 9090  \n",
            "API_PORT= \"9090\" \n",
            "export API_PORT=9090\n",
        ] {
            assert_eq!(port_in_file(content), 9090, "content {content:?}");
        }
    }

    #[test]
    fn finds_port_among_other_settings() {
        let content = "\
# Server settings
API_HOST=0.0.0.0
API_PORT=9090

# Analyzer
ANALYZER_SCHEDULE=0 * * * *
";
        assert_eq!(port_in_file(content), 9090);
    }

    #[test]
    fn absent_or_non_numeric_values_yield_default() {
        for content in ["", "API_HOST=0.0.0.0\n", "API_PORT=\n", "API_PORT=http\n"] {
            assert_eq!(port_in_file(content), 8000, "content {content:?}");
        }
    }

    #[test]
    fn missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_port(&dir.path().join(".env")), 8000);
    }

    #[test]
    fn non_utf8_comment_does_not_hide_port() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, b"# caf\xe9\nAPI_PORT=9090\n").unwrap();

        let setting = resolve_port(&path);
        assert_eq!(setting.port, 9090);
        assert_eq!(setting.source, PortSource::EnvFile);
    }

    #[test]
    fn similarly_named_keys_are_ignored() {
        assert_eq!(port_in_file("ADMIN_API_PORT=9999\nAPI_PORTS=1\n"), 8000);
    }

    proptest! {
        #[test]
        fn any_valid_port_round_trips_through_quoting(
            port in 1u16..=u16::MAX,
            quote in prop::sample::select(vec!["", "\"", "'"]),
            lead in " {0,3}",
            trail in " {0,3}",
        ) {
            let content = format!("API_PORT={lead}{quote}{port}{quote}{trail}\n");
            let setting = port_from_env(&EnvFile::parse(&content));
            prop_assert_eq!(setting.port, port);
            prop_assert_eq!(setting.source, PortSource::EnvFile);
        }

        #[test]
        fn alphabetic_values_always_fall_back(value in "[a-zA-Z]{1,12}") {
            let setting = port_from_env(&EnvFile::parse(&format!("API_PORT={value}\n")));
            prop_assert_eq!(setting.port, DEFAULT_API_PORT);
            prop_assert_eq!(
                setting.source,
                PortSource::Default(DefaultReason::Malformed(value))
            );
        }
    }
}

mod compose_definition {
    use super::*;

    #[test]
    fn loads_services_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path()).unwrap();
        fs::write(
            layout.compose_file(),
            "services:\n  server:\n    build: .\n  analyzer:\n    build: .\n",
        )
        .unwrap();

        let compose = ComposeFile::load(layout.compose_file()).unwrap();
        assert!(compose.declares("server"));
        assert!(compose.declares("analyzer"));
    }
}
