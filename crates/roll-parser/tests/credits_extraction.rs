//! End-to-end extraction over fixture documents for each credits family.

use std::path::Path;

use pretty_assertions::assert_eq;
use roll_core::{
    CreditsDocument, DialectProfiles, InclusionPolicy, MarkupDialect, RoleMap, SizeCodedProfile,
    StyleCodedProfile, SubReleaseMarker,
};
use roll_parser::{CreditsEngine, CreditsFormat, CreditsSource, NameCanonicalizer, ParserError};

const ROME: &str = include_str!("fixtures/rome_credits.txt");
const EMPIRE: &str = include_str!("fixtures/empire_credits.xml");
const SHOGUN_2: &str = include_str!("fixtures/shogun_2_credits.xml");
const WARHAMMER: &str = include_str!("fixtures/warhammer_credits.xml");
const WARHAMMER_2: &str = include_str!("fixtures/warhammer_2_unknown_style.xml");

fn policy() -> InclusionPolicy {
    InclusionPolicy {
        included_sections: ["THE CREATIVE ASSEMBLY".to_string(), "Creative Assembly".to_string()]
            .into(),
        excluded_sections: ["Localisation".to_string(), "Audio Contractors".to_string()].into(),
        excluded_roles: ["Special Thanks".to_string()].into(),
        excluded_entities: ["Platige Image".to_string()].into(),
        aliases: [("Chris Gray".to_string(), "Christopher Gray".to_string())].into(),
    }
}

fn size_coded(stop_at: &str) -> SizeCodedProfile {
    SizeCodedProfile {
        contributor_size: "18".into(),
        role_size: "22".into(),
        section_size: Some("22".into()),
        stop_at: stop_at.into(),
        sub_release: None,
    }
}

fn profiles() -> DialectProfiles {
    let mut shogun_2 = size_coded("English & Japanese Voice Production");
    shogun_2.sub_release = Some(SubReleaseMarker {
        release: "2012_fall_of_the_samurai".into(),
        marker_size: "38".into(),
        marker_text: "- Fall of the Samurai -".into(),
    });

    DialectProfiles {
        size_coded: [
            ("2009_empire".to_string(), size_coded("SEGA Technical Group")),
            ("2011_shogun_2".to_string(), shogun_2),
        ]
        .into(),
        style_coded: [
            (
                "2016_warhammer".to_string(),
                StyleCodedProfile {
                    stop_at: "Audio (External)".into(),
                },
            ),
            (
                "2017_warhammer_2".to_string(),
                StyleCodedProfile {
                    stop_at: "Audio (External)".into(),
                },
            ),
        ]
        .into(),
        ..DialectProfiles::default()
    }
}

fn source(name: &str, text: &str) -> CreditsSource {
    CreditsSource::from_text(Path::new(name), text).expect("fixture loads")
}

fn roles(entries: &[(&str, &[&str])]) -> RoleMap {
    entries
        .iter()
        .map(|(role, names)| {
            (
                (*role).to_string(),
                names.iter().map(|n| (*n).to_string()).collect(),
            )
        })
        .collect()
}

fn all_documents(engine: &CreditsEngine<'_>) -> Vec<CreditsDocument> {
    [
        ("2004_rome", source("credits.txt", ROME)),
        ("2009_empire", source("credits.xml", EMPIRE)),
        ("2011_shogun_2", source("credits.xml", SHOGUN_2)),
        ("2016_warhammer", source("credits.xml", WARHAMMER)),
    ]
    .iter()
    .flat_map(|(release, source)| engine.parse(release, source).expect("fixture parses"))
    .collect()
}

// ── Plain text ───────────────────────────────────────────────

#[test]
fn plain_text_fixture() {
    let policy = policy();
    let profiles = profiles();
    let engine = CreditsEngine::new(&policy, &profiles);

    let docs = engine
        .parse("2004_rome", &source("credits.txt", ROME))
        .expect("plain text parses");

    assert_eq!(docs.len(), 1);
    assert_eq!(
        docs[0].roles,
        roles(&[
            ("Programming", &["Alice Smith", "Christopher Gray"]),
            ("Art", &["Alice Smith", "Bob Jones", "Eve Adams"]),
        ])
    );
}

#[test]
fn plain_text_section_gating_scenario() {
    let policy = InclusionPolicy {
        included_sections: ["Creative Assembly".to_string()].into(),
        excluded_sections: ["Audio Contractors".to_string()].into(),
        ..InclusionPolicy::default()
    };
    let profiles = DialectProfiles::default();
    let engine = CreditsEngine::new(&policy, &profiles);
    let content = "_Creative Assembly\n_Programming\nAlice Smith\n_Audio Contractors\nBob Jones\n";

    let docs = engine
        .parse("r", &CreditsSource::PlainText(content.into()))
        .expect("plain text parses");
    assert_eq!(docs[0].roles, roles(&[("Programming", &["Alice Smith"])]));
}

// ── Size-coded markup ────────────────────────────────────────

#[test]
fn size_coded_fixture_stops_at_sentinel() {
    let policy = policy();
    let profiles = profiles();
    let engine = CreditsEngine::new(&policy, &profiles);
    let empire = source("credits.xml", EMPIRE);

    assert_eq!(
        engine.format_of("2009_empire", &empire),
        CreditsFormat::Markup(MarkupDialect::SizeCoded)
    );

    let docs = engine.parse("2009_empire", &empire).expect("size-coded parses");
    assert_eq!(docs.len(), 1);
    assert_eq!(
        docs[0].roles,
        roles(&[
            ("Lead Programmer", &["Alice Smith"]),
            ("Programming", &["Bob Jones", "Christopher Gray", "Dana Lee"]),
            ("Art", &["Eve Adams"]),
        ])
    );
}

#[test]
fn size_coded_fixture_with_embedded_release() {
    let policy = policy();
    let profiles = profiles();
    let engine = CreditsEngine::new(&policy, &profiles);

    let docs = engine
        .parse("2011_shogun_2", &source("credits.xml", SHOGUN_2))
        .expect("size-coded parses");

    let releases: Vec<&str> = docs.iter().map(|d| d.release.as_str()).collect();
    assert_eq!(releases, vec!["2011_shogun_2", "2012_fall_of_the_samurai"]);
    assert_eq!(
        docs[0].roles,
        roles(&[("Programming", &["Alice Smith", "Bob Jones"])])
    );
    assert_eq!(docs[1].roles, roles(&[("Programming", &["Alice Smith"])]));
}

// ── Style-coded markup ───────────────────────────────────────

#[test]
fn style_coded_fixture() {
    let policy = policy();
    let profiles = profiles();
    let engine = CreditsEngine::new(&policy, &profiles);
    let warhammer = source("credits.xml", WARHAMMER);

    assert_eq!(
        engine.format_of("2016_warhammer", &warhammer),
        CreditsFormat::Markup(MarkupDialect::StyleCoded)
    );

    let docs = engine
        .parse("2016_warhammer", &warhammer)
        .expect("style-coded parses");
    assert_eq!(
        docs[0].roles,
        roles(&[
            ("Programming", &["Alice Smith", "Bob Jones", "Christopher Gray"]),
            ("Cinematics", &["Eve Adams"]),
        ])
    );
}

#[test]
fn unknown_style_fails_only_its_own_document() {
    let policy = policy();
    let profiles = profiles();
    let engine = CreditsEngine::new(&policy, &profiles);

    let batch = [
        ("2017_warhammer_2", source("credits.xml", WARHAMMER_2)),
        ("2016_warhammer", source("credits.xml", WARHAMMER)),
    ];
    let results: Vec<_> = batch
        .iter()
        .map(|(release, source)| engine.parse(release, source))
        .collect();

    match &results[0] {
        Err(ParserError::UnknownStyle { release, style, line }) => {
            assert_eq!(release, "2017_warhammer_2");
            assert_eq!(style, "banner");
            assert_eq!(*line, 4);
        }
        other => panic!("expected UnknownStyle, got {other:?}"),
    }
    assert!(results[0]
        .as_ref()
        .unwrap_err()
        .to_string()
        .contains("banner"));

    let good = results[1].as_ref().expect("second document parses");
    assert_eq!(good[0].release, "2016_warhammer");
    assert!(!good[0].is_empty());
}

// ── Properties ───────────────────────────────────────────────

#[test]
fn outputs_respect_policy_invariants() {
    let policy = policy();
    let profiles = profiles();
    let engine = CreditsEngine::new(&policy, &profiles);

    for doc in all_documents(&engine) {
        for (role, names) in &doc.roles {
            assert!(!policy.is_excluded_role(role), "{}: {role}", doc.release);
            assert!(!role.is_empty());
            assert!(!names.is_empty(), "{}: empty role {role}", doc.release);

            let mut sorted = names.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(&sorted, names, "{}: {role} not sorted/unique", doc.release);

            for name in names {
                assert!(!name.is_empty());
                assert!(!policy.is_excluded_entity(name), "{}: {name}", doc.release);
            }
        }
        assert!(!doc.roles.contains_key("Translators"));
        assert!(!doc.roles.contains_key("Music"));
    }
}

#[test]
fn output_names_are_already_canonical() {
    let policy = policy();
    let profiles = profiles();
    let engine = CreditsEngine::new(&policy, &profiles);
    let canonicalizer = NameCanonicalizer::new(&policy);

    for doc in all_documents(&engine) {
        for name in doc.roles.values().flatten() {
            assert_eq!(&canonicalizer.canonicalize(name), name);
        }
    }
}

#[test]
fn parsing_is_deterministic() {
    let policy = policy();
    let profiles = profiles();
    let engine = CreditsEngine::new(&policy, &profiles);

    let first = serde_json::to_string(&all_documents(&engine)).expect("serialize");
    let second = serde_json::to_string(&all_documents(&engine)).expect("serialize");
    assert_eq!(first, second);
}
