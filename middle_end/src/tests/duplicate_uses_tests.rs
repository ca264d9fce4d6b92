use crate::check_ast::{CheckKind, InternalError};

use super::{well_formed, Fixture};

#[test]
fn test_well_formed_program_has_unique_formals() {
    let fx = well_formed();
    assert!(fx.check(CheckKind::DuplicateUses).is_ok());
}

#[test]
fn test_formal_shared_by_two_functions() {
    let mut fx = Fixture::new();
    let (f, formals) = fx.function("f", &["x", "y"], 1);

    // a cloning pass that forgot to copy the formals
    let g = fx.function_with("g", vec![formals[1]], 2);

    let err = fx.check(CheckKind::DuplicateUses).unwrap_err();
    assert_eq!(
        err,
        InternalError::DuplicateFormal {
            formal: formals[1],
            first_owner: f,
            second_owner: g,
        }
    );
    assert_eq!(err.to_string(), "argument used in multiple function definitions");
}

#[test]
fn test_reports_first_duplicate_in_registration_order() {
    let mut fx = Fixture::new();
    let (_, f_formals) = fx.function("f", &["a", "b"], 1);
    let (_, g_formals) = fx.function("g", &["c"], 2);

    let h = fx.function_with("h", vec![g_formals[0], f_formals[0]], 3);

    match fx.check(CheckKind::DuplicateUses) {
        Err(InternalError::DuplicateFormal { formal, second_owner, .. }) => {
            assert_eq!(formal, g_formals[0], "Should stop at the first formal of h that is already owned");
            assert_eq!(second_owner, h);
        }
        other => panic!("Expected DuplicateFormal, got {:?}", other),
    }
}

#[test]
fn test_function_without_formals_is_fine() {
    let mut fx = Fixture::new();
    fx.function("main", &[], 1);
    fx.function("init", &[], 2);

    assert!(fx.check(CheckKind::DuplicateUses).is_ok());
}
