//! Token derivation properties
//!
//! The digest must be a pure function of (visitorId, boothId, timestamp,
//! salt) and sensitive to every one of them; the backend recomputes it from
//! the same formula.

use booth_checkin::token;
use booth_checkin::types::{BoothId, VisitorId};
use proptest::prelude::*;

#[test]
fn test_backend_parity_vector() {
    // sha256("visitor-01" + "booth-7" + "1700000000000" + "810810114514")
    let token = token::derive(
        &VisitorId::new("visitor-01"),
        &BoothId::new("booth-7"),
        1700000000000,
        "810810114514",
    );
    assert_eq!(
        token,
        "3c7b11d6958bd98f69ef3c7d3d906139b748a86c9176ad0f012d47cca7a7d897"
    );
}

proptest! {
    #[test]
    fn test_token_is_pure(
        visitor in "[a-zA-Z0-9]{1,32}",
        booth in "[a-zA-Z0-9-]{1,16}",
        timestamp in 0i64..=4_102_444_800_000,
        salt in "[a-zA-Z0-9]{0,16}",
    ) {
        let visitor = VisitorId::new(visitor);
        let booth = BoothId::new(booth);
        prop_assert_eq!(
            token::derive(&visitor, &booth, timestamp, &salt),
            token::derive(&visitor, &booth, timestamp, &salt)
        );
    }

    #[test]
    fn test_token_is_lowercase_hex(
        visitor in "[a-zA-Z0-9]{1,32}",
        booth in "[a-zA-Z0-9-]{1,16}",
        timestamp in 0i64..=4_102_444_800_000,
        salt in "[a-zA-Z0-9]{0,16}",
    ) {
        let token = token::derive(&VisitorId::new(visitor), &BoothId::new(booth), timestamp, &salt);
        prop_assert_eq!(token.len(), 64);
        prop_assert!(token.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_timestamp_change_changes_token(
        visitor in "[a-zA-Z0-9]{1,32}",
        booth in "[a-zA-Z0-9-]{1,16}",
        timestamp in 0i64..=4_102_444_800_000,
        salt in "[a-zA-Z0-9]{0,16}",
    ) {
        let visitor = VisitorId::new(visitor);
        let booth = BoothId::new(booth);
        prop_assert_ne!(
            token::derive(&visitor, &booth, timestamp, &salt),
            token::derive(&visitor, &booth, timestamp + 1, &salt)
        );
    }

    #[test]
    fn test_salt_change_changes_token(
        visitor in "[a-zA-Z0-9]{1,32}",
        booth in "[a-zA-Z0-9-]{1,16}",
        timestamp in 0i64..=4_102_444_800_000,
        salt in "[a-zA-Z0-9]{1,16}",
    ) {
        let visitor = VisitorId::new(visitor);
        let booth = BoothId::new(booth);
        let other_salt = format!("{salt}x");
        prop_assert_ne!(
            token::derive(&visitor, &booth, timestamp, &salt),
            token::derive(&visitor, &booth, timestamp, &other_salt)
        );
    }
}
