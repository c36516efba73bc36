use roll_core::{ContributionTimeline, RoleMap};
use roll_timeline::{Statistics, Transition};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaKind};
use crate::output::output;

/// Handle `rollcall schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(args.kind), flags.format)
}

fn schema(kind: SchemaKind) -> schemars::Schema {
    match kind {
        SchemaKind::Credits => schema_for!(RoleMap),
        SchemaKind::Timeline => schema_for!(ContributionTimeline),
        SchemaKind::Statistics => schema_for!(Statistics),
        SchemaKind::Transitions => schema_for!(Vec<Transition>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_schema_names_the_final_field() {
        let value = serde_json::to_value(schema(SchemaKind::Statistics)).expect("serialize");
        let text = value.to_string();
        assert!(text.contains("\"final\""));
        assert!(text.contains("remaining_old_timers"));
    }

    #[test]
    fn every_kind_produces_an_object_schema() {
        for kind in [
            SchemaKind::Credits,
            SchemaKind::Timeline,
            SchemaKind::Statistics,
            SchemaKind::Transitions,
        ] {
            let value = serde_json::to_value(schema(kind)).expect("serialize");
            assert!(value.is_object(), "{kind:?}");
            assert!(value.get("$schema").is_some(), "{kind:?}");
        }
    }
}
