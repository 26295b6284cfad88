//! Property-based tests for the transition guard and the create builder.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use orbdeck::domain::create::build_create_command;
use orbdeck::domain::machine::{Distro, MachineState};
use orbdeck::domain::tool_args::CreateArgs;
use orbdeck::domain::transition::{RequestedState, StateTransition, decide};
use orbdeck::domain::validate::validate_create_args;
use orbdeck::domain::ValidationError;

fn any_state() -> impl Strategy<Value = MachineState> {
    prop_oneof![
        Just(MachineState::Running),
        Just(MachineState::Stopped),
        Just(MachineState::Stopping),
        "[a-z]{1,10}".prop_map(|s| MachineState::parse(&s)),
    ]
}

fn any_requested() -> impl Strategy<Value = RequestedState> {
    prop_oneof![Just(RequestedState::Running), Just(RequestedState::Stopped)]
}

fn any_distro() -> impl Strategy<Value = String> {
    prop::sample::select(Distro::ALL.to_vec()).prop_map(|d| d.value().to_string())
}

// ============================================================================
// Transition guard
// ============================================================================

proptest! {
    /// Only stopped→running and running→stopped ever issue a command.
    #[test]
    fn prop_guard_executes_only_real_toggles(
        current in any_state(),
        requested in any_requested(),
        id in "[0-9A-Z]{4,12}",
    ) {
        let transition = StateTransition {
            id: id.clone(),
            current: current.clone(),
            requested,
        };
        let decision = decide(&transition);
        let verb = match (&current, requested) {
            (MachineState::Stopped, RequestedState::Running) => Some("start"),
            (MachineState::Running, RequestedState::Stopped) => Some("stop"),
            _ => None,
        };
        prop_assert_eq!(decision.should_execute(), verb.is_some());
        match verb {
            Some(verb) => prop_assert_eq!(decision.command(), &[verb.to_string(), id][..]),
            None => prop_assert!(decision.command().is_empty()),
        }
    }
}

// ============================================================================
// Create validation and builder
// ============================================================================

proptest! {
    /// Any underscore in the machine name fails validation, whatever else is set.
    #[test]
    fn prop_underscore_name_always_rejected(
        prefix in "[a-z0-9-]{0,8}",
        suffix in "[a-z0-9-]{0,8}",
        distro in any_distro(),
    ) {
        let args = CreateArgs {
            machine_name: format!("{prefix}_{suffix}"),
            distro,
            ..CreateArgs::default()
        };
        prop_assert_eq!(validate_create_args(&args), Err(ValidationError::UnderscoreInName));
    }

    /// A built command always names an architecture and ends with the machine name.
    #[test]
    fn prop_create_command_shape(
        name in "[a-z][a-z0-9-]{0,15}",
        distro in any_distro(),
        version in proptest::option::of("[0-9.]{0,5}"),
        user in proptest::option::of("[a-z ]{0,6}"),
        arch in proptest::option::of(prop_oneof![
            Just("arm64".to_string()),
            Just("amd64".to_string()),
            Just("x86_64".to_string()),
        ]),
    ) {
        let args = CreateArgs {
            machine_name: name.clone(),
            distro: distro.clone(),
            version: version.clone(),
            user_name: user.clone(),
            architecture: arch,
        };
        let argv = build_create_command(&args);
        prop_assert_eq!(argv.first().map(String::as_str), Some("create"));
        prop_assert_eq!(argv.last(), Some(&name));

        let a = argv.iter().position(|t| t == "-a").expect("-a present");
        prop_assert!(argv[a + 1] == "arm64" || argv[a + 1] == "amd64");
        prop_assert!(argv[a + 2].starts_with(&distro));

        let has_user = user.as_deref().is_some_and(|u| !u.trim().is_empty());
        prop_assert_eq!(argv.contains(&"-u".to_string()), has_user);
        let has_version = version.as_deref().is_some_and(|v| !v.trim().is_empty());
        prop_assert_eq!(argv[a + 2].contains(':'), has_version);
    }
}
