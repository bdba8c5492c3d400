use super::*;

#[test]
fn display_matches_as_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.to_string(), code.as_str());
    }
}

#[test]
fn ranges_are_disjoint() {
    for code in ErrorCode::ALL {
        let classes = [
            code.is_missing_error(),
            code.is_type_error(),
            code.is_internal_error(),
        ];
        assert_eq!(classes.iter().filter(|c| **c).count(), 1, "{code}");
    }
}

#[test]
fn parse_round_trips_every_code() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("e2003".parse::<ErrorCode>(), Ok(ErrorCode::E2003));
    assert_eq!("E0000".parse::<ErrorCode>(), Err(()));
}
