//! Tests for identifier ordering, indices and message type sets.

use rstest::rstest;

use crate::fragment::*;

#[rstest]
#[case(1, 0, true)]
#[case(0, u16::MAX, true)]
#[case(u16::MAX, 0, false)]
#[case(100, 100, false)]
#[case(0x7FFF, 0, true)]
#[case(0x8000, 0, false)]
#[case(0, 0x8000, false)]
#[case(5, 0xFFF0, true)]
fn circular_ordering(#[case] candidate: u16, #[case] current: u16, #[case] newer: bool) {
    assert_eq!(
        MessageId::new(candidate).is_newer_than(MessageId::new(current)),
        newer
    );
}

#[test]
fn forward_distance_wraps() {
    assert_eq!(
        MessageId::new(0).forward_distance_from(MessageId::new(u16::MAX)),
        1
    );
    assert_eq!(
        MessageId::new(u16::MAX).forward_distance_from(MessageId::new(0)),
        u16::MAX
    );
}

#[test]
fn wrapping_next_rolls_over() {
    assert_eq!(MessageId::new(41).wrapping_next(), MessageId::new(42));
    assert_eq!(MessageId::new(u16::MAX).wrapping_next(), MessageId::new(0));
}

#[test]
fn fragment_index_conversions() {
    assert_eq!(FragmentIndex::try_from(7_usize), Ok(FragmentIndex::new(7)));
    assert!(FragmentIndex::try_from(70_000_usize).is_err());
    assert_eq!(u16::from(FragmentIndex::new(9)), 9);
    assert!(FragmentIndex::new(2).fits(3));
    assert!(!FragmentIndex::new(3).fits(3));
}

#[rstest]
#[case(0, true)]
#[case(63, true)]
#[case(64, false)]
#[case(255, false)]
fn message_type_range(#[case] raw: u8, #[case] valid: bool) {
    let parsed = MessageType::new(raw);
    assert_eq!(parsed.is_ok(), valid);
    if !valid {
        assert_eq!(parsed, Err(InvalidMessageType(raw)));
    }
}

#[test]
fn type_set_membership() {
    let one = MessageType::new(1).expect("valid type");
    let two = MessageType::new(2).expect("valid type");
    let five = MessageType::new(5).expect("valid type");
    let top = MessageType::new(63).expect("valid type");

    let mut set: MessageTypeSet = [one, two].into_iter().collect();
    assert_eq!(set.len(), 2);
    assert!(set.contains(one));
    assert!(!set.contains(five));

    set.insert(top);
    set.remove(one);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![two, top]);

    assert!(MessageTypeSet::empty().is_empty());
    assert_eq!(MessageTypeSet::all().len(), 64);
    assert_eq!(MessageTypeSet::default(), MessageTypeSet::all());
}
