use super::*;
use proptest::prelude::*;

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Normal), Just(Orientation::Reversed)]
}

#[test]
fn normal_rotor_at_zero_reads_wiring_directly() {
    let rotor = CipherRotor::new(BigRotorId(0), Orientation::Normal);
    assert_eq!(rotor.encrypt_path(0), 24);
    assert_eq!(rotor.decrypt_path(24), 0);
}

#[test]
fn reversed_rotor_reads_inverse_from_the_other_side() {
    // 'A' sits at left contact 21 of row 0, so inverse[0] = 21.
    let rotor = CipherRotor::new(BigRotorId(0), Orientation::Reversed);
    assert_eq!(rotor.encrypt_path(0), 5);
    assert_eq!(rotor.decrypt_path(5), 0);
}

#[test]
fn index_path_uses_mod_ten_offsets() {
    let mut rotor = IndexRotor::new(IndexRotorId(0), Orientation::Normal);
    rotor.rotor_mut().set_position(3);
    // forward[3] = 1, minus the offset wraps to 8.
    assert_eq!(rotor.index_path(0), 8);
}

#[test]
fn normal_clockwise_step_counts_down() {
    let mut rotor = Rotor::new(Wiring::big(BigRotorId(1)), Orientation::Normal);
    rotor.rotate_clockwise();
    assert_eq!(rotor.position(), 25);
    rotor.rotate_counter_clockwise();
    rotor.rotate_counter_clockwise();
    assert_eq!(rotor.position(), 1);
}

#[test]
fn reversed_clockwise_step_counts_up() {
    let mut rotor = Rotor::new(Wiring::index(IndexRotorId(2)), Orientation::Reversed);
    rotor.set_position(9);
    rotor.rotate_clockwise();
    assert_eq!(rotor.position(), 0);
    rotor.rotate_counter_clockwise();
    assert_eq!(rotor.position(), 9);
}

#[test]
fn set_position_wraps_into_domain() {
    let mut rotor = Rotor::new(Wiring::index(IndexRotorId(0)), Orientation::Normal);
    rotor.set_position(13);
    assert_eq!(rotor.position(), 3);
}

#[test]
fn display_shows_id_and_flag() {
    assert_eq!(
        CipherRotor::new(BigRotorId(7), Orientation::Reversed).to_string(),
        "7R"
    );
    assert_eq!(
        IndexRotor::new(IndexRotorId(3), Orientation::Normal).to_string(),
        "3N"
    );
}

proptest! {
    #[test]
    fn rotations_are_mutual_inverses(
        id in 0u8..10,
        orientation in orientation(),
        position in 0usize..26,
    ) {
        let mut rotor = Rotor::new(Wiring::big(BigRotorId(id)), orientation);
        rotor.set_position(position);
        rotor.rotate_clockwise();
        rotor.rotate_counter_clockwise();
        prop_assert_eq!(rotor.position(), position);
        rotor.rotate_counter_clockwise();
        rotor.rotate_clockwise();
        prop_assert_eq!(rotor.position(), position);
    }

    #[test]
    fn decrypt_path_undoes_encrypt_path(
        id in 0u8..10,
        orientation in orientation(),
        position in 0usize..26,
        contact in 0usize..26,
    ) {
        let mut rotor = CipherRotor::new(BigRotorId(id), orientation);
        rotor.rotor_mut().set_position(position);
        prop_assert_eq!(rotor.decrypt_path(rotor.encrypt_path(contact)), contact);
        prop_assert_eq!(rotor.encrypt_path(rotor.decrypt_path(contact)), contact);
    }

    #[test]
    fn encrypt_path_is_a_permutation(
        id in 0u8..10,
        orientation in orientation(),
        position in 0usize..26,
    ) {
        let mut rotor = CipherRotor::new(BigRotorId(id), orientation);
        rotor.rotor_mut().set_position(position);
        let mut seen = [false; 26];
        for contact in 0..26 {
            seen[rotor.encrypt_path(contact)] = true;
        }
        prop_assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn control_path_matches_cipher_decrypt_path(
        id in 0u8..10,
        orientation in orientation(),
        position in 0usize..26,
        contact in 0usize..26,
    ) {
        let mut control = ControlRotor::new(BigRotorId(id), orientation);
        let mut cipher = CipherRotor::new(BigRotorId(id), orientation);
        control.rotor_mut().set_position(position);
        cipher.rotor_mut().set_position(position);
        prop_assert_eq!(control.control_path(contact), cipher.decrypt_path(contact));
    }

    #[test]
    fn index_path_is_a_permutation(
        id in 0u8..5,
        orientation in orientation(),
        position in 0usize..10,
    ) {
        let mut rotor = IndexRotor::new(IndexRotorId(id), orientation);
        rotor.rotor_mut().set_position(position);
        let mut seen = [false; 10];
        for contact in 0..10 {
            seen[rotor.index_path(contact)] = true;
        }
        prop_assert!(seen.iter().all(|hit| *hit));
    }
}
