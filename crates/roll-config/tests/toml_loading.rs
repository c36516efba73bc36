//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and file manipulation.

use std::path::{Path, PathBuf};

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use roll_config::RollConfig;
use roll_core::MarkupDialect;

#[test]
fn loads_policy_and_dialects_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[policy]
included_sections = ["Creative Assembly"]
excluded_sections = ["Localisation"]
excluded_roles = ["Special Thanks"]
excluded_entities = ["Platige Image"]

[policy.aliases]
"Chris Gray" = "Christopher Gray"

[dialects.size_coded.2009_empire]
contributor_size = "18"
role_size = "22"
stop_at = "SEGA Technical Group"

[dialects.style_coded.2016_warhammer]
stop_at = "Audio (External)"

[dialects.overrides]
2016_warhammer = "style_coded"
"#,
        )?;

        let config: RollConfig = Figment::from(Serialized::defaults(RollConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.policy.is_included_section("Creative Assembly"));
        assert!(config.policy.is_excluded_role("Special Thanks"));
        assert_eq!(
            config.policy.alias_for("Chris Gray"),
            Some("Christopher Gray")
        );

        let empire = config
            .dialects
            .size_coded("2009_empire")
            .expect("empire profile");
        assert_eq!(empire.section_size(), "22");
        assert!(empire.sub_release.is_none());
        assert_eq!(
            config.dialects.override_for("2016_warhammer"),
            Some(MarkupDialect::StyleCoded)
        );
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn explicit_config_path_is_layered() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[general]
games_dir = "corpus"
parallel = false
"#,
        )?;

        let config = RollConfig::load(Some(Path::new("custom.toml"))).expect("config loads");
        assert_eq!(config.general.games_dir, PathBuf::from("corpus"));
        assert!(!config.general.parallel);
        assert_eq!(config.general.processed_dir, PathBuf::from("processed"));
        Ok(())
    });
}

#[test]
fn missing_explicit_config_is_an_error() {
    Jail::expect_with(|_jail| {
        let result = RollConfig::load(Some(Path::new("does-not-exist.toml")));
        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".rollcall"))
            .map_err(|e| e.to_string())?;
        jail.create_file(
            ".rollcall/config.toml",
            r#"
[general]
processed_dir = "out"
"#,
        )?;

        let config = RollConfig::load(None).expect("config loads");
        assert_eq!(config.general.processed_dir, PathBuf::from("out"));
        Ok(())
    });
}

#[test]
fn duplicate_release_index_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[[releases]]
id = "2004_rome"
index = 2
label = "Rome (2004)"

[[releases]]
id = "2006_medieval_2"
index = 2
label = "Medieval 2 (2006)"
"#,
        )?;

        let config = RollConfig::load(Some(Path::new("config.toml"))).expect("config loads");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate release index 2"), "{err}");
        Ok(())
    });
}

#[test]
fn shipped_corpus_config_is_valid() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../config/rollcall.toml");

    let config: RollConfig = Figment::from(Serialized::defaults(RollConfig::default()))
        .merge(Toml::file_exact(&path))
        .extract()
        .expect("shipped config parses");

    config.validate().expect("shipped config validates");

    let labels = config
        .policy
        .included_sections
        .iter()
        .chain(&config.policy.excluded_sections)
        .chain(&config.policy.excluded_roles);
    for label in labels {
        assert!(!label.contains("&amp;"), "label is not entity-decoded: {label}");
    }
    assert!(
        config
            .policy
            .is_excluded_section("English & Japanese Voice Production")
    );

    let catalog = config.catalog().expect("catalog");
    assert_eq!(catalog.terminal().map(|r| r.id.as_str()), Some("none"));
    assert_eq!(catalog.index_of("2000_shogun"), Some(0));

    let shogun_2 = config
        .dialects
        .size_coded("2011_shogun_2")
        .expect("shogun 2 profile");
    let sub = shogun_2.sub_release.as_ref().expect("sub-release marker");
    assert_eq!(sub.release, "2012_fall_of_the_samurai");
    assert_eq!(sub.marker_size, "38");

    let britannia = config
        .dialects
        .size_coded("2018_thrones_of_britannia")
        .expect("britannia profile");
    assert_eq!(britannia.role_size, "16");
    assert_eq!(britannia.section_size(), "18");

    for release in &config.statistics.overlap_releases {
        assert!(catalog.get(release).is_some(), "unknown release {release}");
    }
}
