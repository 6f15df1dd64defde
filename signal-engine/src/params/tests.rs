use super::*;
use chrono::NaiveDate;
use trader_api::model::{ContractType, Instruction, RawSignal, RawSignalFlags, RiskLevel};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn base_raw() -> RawSignal {
    RawSignal {
        instruction: "BTO".into(),
        ticker: "INTC".into(),
        strike_price: "50".into(),
        contract_type: "C".into(),
        expiration: "12/31".into(),
        contract_price: "0.45".into(),
        comments: None,
        flags: RawSignalFlags::default(),
    }
}

fn today() -> NaiveDate {
    date(2022, 1, 1)
}

#[test]
fn test_valid_signal_passes() {
    assert!(validate(&base_raw(), today()));
}

#[test]
fn test_invalid_instruction() {
    for instruction in ["bto", "BUY", "", "BTOX"] {
        let raw = RawSignal {
            instruction: instruction.into(),
            ..base_raw()
        };
        assert!(!validate(&raw, today()), "{instruction:?}");
    }
}

#[test]
fn test_invalid_ticker() {
    for ticker in ["", "intc", "ABCDEF", "AB1", "A B"] {
        let raw = RawSignal {
            ticker: ticker.into(),
            ..base_raw()
        };
        assert!(!validate(&raw, today()), "{ticker:?}");
    }
}

#[test]
fn test_strike_bounds_and_granularity() {
    for strike in ["1", "99999.5", "50.5", "2.0"] {
        let raw = RawSignal {
            strike_price: strike.into(),
            ..base_raw()
        };
        assert!(validate(&raw, today()), "{strike:?}");
    }
    for strike in ["0.5", "0.99", "100000", "100000.5", "50.25", "50.1", "abc", ""] {
        let raw = RawSignal {
            strike_price: strike.into(),
            ..base_raw()
        };
        assert!(!validate(&raw, today()), "{strike:?}");
    }
}

#[test]
fn test_invalid_contract_type() {
    for contract_type in ["c", "p", "X", "CP", ""] {
        let raw = RawSignal {
            contract_type: contract_type.into(),
            ..base_raw()
        };
        assert!(!validate(&raw, today()), "{contract_type:?}");
    }
}

#[test]
fn test_contract_price_bounds() {
    for price in ["0.01", "999.99", "1.00"] {
        let raw = RawSignal {
            contract_price: price.into(),
            ..base_raw()
        };
        assert!(validate(&raw, today()), "{price:?}");
    }
    for price in ["0", "0.00", "1000", "1000.01", "-1.00", "abc", ""] {
        let raw = RawSignal {
            contract_price: price.into(),
            ..base_raw()
        };
        assert!(!validate(&raw, today()), "{price:?}");
    }
}

#[test]
fn test_expiration_forms() {
    let today = date(2022, 1, 1);
    assert!(is_expiration_valid("1/1", today));
    assert!(is_expiration_valid("12/31", today));
    assert!(is_expiration_valid("01/01/2022", today));
    assert!(is_expiration_valid("1/21/22", today));

    assert!(!is_expiration_valid("13/1", today));
    assert!(!is_expiration_valid("2/30", today));
    assert!(!is_expiration_valid("1/1/1/1", today));
    assert!(!is_expiration_valid("1-1", today));
    assert!(!is_expiration_valid("2022", today));
    assert!(!is_expiration_valid("", today));
    assert!(!is_expiration_valid("a/b", today));
}

#[test]
fn test_expiration_year_ceiling() {
    let today = date(2022, 1, 1);
    // Three years out is the limit.
    assert!(is_expiration_valid("1/1/2025", today));
    assert!(!is_expiration_valid("1/1/2026", today));
    assert!(!is_expiration_valid("1/1/26", today));
}

#[test]
fn test_expiration_same_day_ok_past_rejected() {
    let today = date(2022, 6, 15);
    assert!(is_expiration_valid("6/15", today));
    assert!(!is_expiration_valid("6/14", today));
    assert!(!is_expiration_valid("12/31/21", today));
}

#[test]
fn test_normalize_strike_rendering() {
    for (inputs, expected) in [
        (vec!["50", "050", "50.", "50.0", "050.000"], "50"),
        (vec!["50.5", "050.50", "50.500"], "50.5"),
        (vec!["0.5", "00.50", ".500", ".5"], "0.5"),
    ] {
        for input in inputs {
            let raw = RawSignal {
                strike_price: input.into(),
                ..base_raw()
            };
            let signal = normalize(&raw, today()).unwrap();
            assert_eq!(signal.strike().as_str(), expected, "{input:?}");
        }
    }
}

#[test]
fn test_normalize_illegal_strike_is_error() {
    let raw = RawSignal {
        strike_price: "50.25".into(),
        ..base_raw()
    };
    assert!(normalize(&raw, today()).is_err());
}

#[test]
fn test_normalize_typed_fields() {
    let raw = RawSignal {
        flags: RawSignalFlags {
            stop_loss: Some(".35".into()),
            risk_level: Some("high risk".into()),
            reduce: Some("50%".into()),
        },
        ..base_raw()
    };
    let signal = normalize(&raw, today()).unwrap();
    assert_eq!(signal.instruction(), Instruction::Bto);
    assert_eq!(signal.contract_type(), ContractType::Call);
    assert_eq!(signal.expiration(), date(2022, 12, 31));
    assert!((signal.contract_price() - 0.45).abs() < 1e-9);
    assert_eq!(signal.flags().stop_loss, Some(0.35));
    assert_eq!(signal.flags().risk_level, Some(RiskLevel::High));
    assert_eq!(signal.flags().reduce, Some(0.5));
}

#[test]
fn test_normalize_expiration_year_expansion() {
    let raw = RawSignal {
        expiration: "1/21/22".into(),
        ..base_raw()
    };
    let signal = normalize(&raw, today()).unwrap();
    assert_eq!(signal.expiration(), date(2022, 1, 21));

    let raw = RawSignal {
        expiration: "1/21/2023".into(),
        ..base_raw()
    };
    let signal = normalize(&raw, today()).unwrap();
    assert_eq!(signal.expiration(), date(2023, 1, 21));
}

#[test]
fn test_normalize_reduce_fraction() {
    for (input, expected) in [("50%", 0.5), ("100%", 1.0), ("40.5%", 0.405), ("50", 0.5)] {
        let raw = RawSignal {
            flags: RawSignalFlags {
                reduce: Some(input.into()),
                ..Default::default()
            },
            ..base_raw()
        };
        let signal = normalize(&raw, today()).unwrap();
        let got = signal.flags().reduce.unwrap();
        assert!((got - expected).abs() < 1e-9, "{input:?} -> {got}");
    }
    for input in ["0%", "150%", "-10%", "abc", ""] {
        let raw = RawSignal {
            flags: RawSignalFlags {
                reduce: Some(input.into()),
                ..Default::default()
            },
            ..base_raw()
        };
        assert!(normalize(&raw, today()).is_err(), "{input:?}");
    }
}

#[test]
fn test_normalize_unknown_risk_tag_dropped() {
    let raw = RawSignal {
        flags: RawSignalFlags {
            risk_level: Some("medium risk".into()),
            ..Default::default()
        },
        ..base_raw()
    };
    let signal = normalize(&raw, today()).unwrap();
    assert_eq!(signal.flags().risk_level, None);
}
