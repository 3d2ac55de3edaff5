use shared::domain::Direction;
use shared::error::ErrorCode;

use super::*;

#[test]
fn default_settings_build_the_reference_machine() {
    let mut machine = MachineSetup::from_settings(&Settings::default())
        .expect("defaults are valid")
        .build();
    assert_eq!(machine.positions().cipher, "OOOOO");
    assert_eq!(
        machine.process_text("HELLOWORLD", Direction::Encrypt),
        "FLQGFONNOE"
    );
}

#[test]
fn reused_big_rotor_is_rejected() {
    let settings = Settings {
        control_order: "5N6N7N8N0R".into(),
        ..Settings::default()
    };
    let err = MachineSetup::from_settings(&settings).expect_err("rotor 0 twice");
    assert_eq!(err, SetupError::DuplicateBigRotor { id: 0 });
    assert_eq!(err.code(), ErrorCode::DuplicateRotor);
}

#[test]
fn unknown_machine_is_rejected() {
    let settings = Settings {
        machine: "CSPNONE".into(),
        ..Settings::default()
    };
    assert_eq!(
        MachineSetup::from_settings(&settings),
        Err(SetupError::UnknownMachine("CSPNONE".into()))
    );
}

#[test]
fn positions_must_be_exact() {
    let settings = Settings {
        index_pos: "0000".into(),
        ..Settings::default()
    };
    assert_eq!(
        MachineSetup::from_settings(&settings),
        Err(SetupError::PositionLength {
            bank: BankKind::Index,
            actual: 4,
        })
    );

    let settings = Settings {
        cipher_pos: "oOOOO".into(),
        ..Settings::default()
    };
    assert!(MachineSetup::from_settings(&settings).is_err());
}

#[test]
fn navy_keying_ignores_cipher_positions() {
    let settings = Settings {
        cipher_pos: "bogus".into(),
        control_pos: "MNOPQ".into(),
        navy_init: true,
        ..Settings::default()
    };
    let mut machine = MachineSetup::from_settings(&settings)
        .expect("cipher positions unused")
        .build();
    assert_eq!(machine.positions().cipher, "NMPBC");
    assert_eq!(machine.positions().control, "MNOPQ");
    assert_eq!(machine.process_text("NAVY", Direction::Encrypt), "OGVO");
}

#[test]
fn csp2900_setup() {
    let settings = Settings {
        cipher_order: "0R1N2R3N4R".into(),
        control_order: "5N6R7N8R9N".into(),
        index_order: "0N1R2N3R4N".into(),
        machine: "csp 2900".into(),
        index_pos: "01234".into(),
        ..Settings::default()
    };
    let mut machine = MachineSetup::from_settings(&settings).expect("valid").build();
    assert_eq!(
        machine.process_text("attack at dawn", Direction::Encrypt).len(),
        14
    );
    let mut machine = MachineSetup::from_settings(&settings).expect("valid").build();
    assert_eq!(
        machine.process_text("ATTACKATDAWN", Direction::Encrypt),
        "UREHQGYZQCNL"
    );
}
