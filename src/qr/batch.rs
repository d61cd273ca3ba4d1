//! Multi-contact QR export.
//!
//! Contacts are packed into JSON arrays in their original order. Each array
//! is filled greedily and a new one is opened as soon as the next contact
//! would push it over budget (first-fit, not optimal bin packing).

use tracing::debug;

use crate::error::Result;
use crate::model::Contact;
use crate::qr::encode::{char_len, fit_to_budget, QrPayload};
use crate::qr::QrBudget;

/// `[` + `]`
const ARRAY_OVERHEAD: usize = 2;

/// Encode contacts into one or more batch payloads, none over `budget`.
///
/// Each contact is first shrunk to fit alone inside an array. An empty
/// input gives no payloads.
///
/// # Errors
///
/// Returns `QrPayloadTooLarge` if some contact cannot fit even alone.
pub fn encode_batch_for_qr(contacts: &[Contact], budget: QrBudget) -> Result<Vec<String>> {
    let limit = budget.chars();
    let item_limit = limit.saturating_sub(ARRAY_OVERHEAD);

    let mut payloads = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = ARRAY_OVERHEAD;

    for contact in contacts {
        let item = fit_to_budget(QrPayload::from_contact(contact), item_limit)?;
        let item_len = char_len(&item);

        // +1 for the separating comma.
        if !current.is_empty() && current_len + 1 + item_len > limit {
            payloads.push(close(&mut current));
            current_len = ARRAY_OVERHEAD;
        }
        if !current.is_empty() {
            current_len += 1;
        }
        current_len += item_len;
        current.push(item);
    }

    if !current.is_empty() {
        payloads.push(close(&mut current));
    }

    debug!(
        contacts = contacts.len(),
        payloads = payloads.len(),
        budget = limit,
        "Packed contacts into QR payloads"
    );
    Ok(payloads)
}

fn close(items: &mut Vec<String>) -> String {
    let payload = format!("[{}]", items.join(","));
    items.clear();
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::qr::decode_batch_from_qr;

    fn numbered(n: usize) -> Vec<Contact> {
        (0..n)
            .map(|i| {
                let mut contact = Contact::new(format!("First{i:02}"), format!("Last{i:02}"));
                contact.job_titles = vec!["Engineer".to_string()];
                contact.phone = Some(format!("+1 555 01{i:02}"));
                contact
            })
            .collect()
    }

    #[test]
    fn test_fifty_contacts_split_in_order_under_budget() {
        let contacts = numbered(50);
        let budget = QrBudget::default();

        let payloads = encode_batch_for_qr(&contacts, budget).unwrap();
        assert!(payloads.len() > 1);

        let mut recovered = Vec::new();
        for payload in &payloads {
            assert!(char_len(payload) <= budget.chars());
            let value: serde_json::Value = serde_json::from_str(payload).unwrap();
            assert!(value.is_array());
            recovered.extend(decode_batch_from_qr(payload).unwrap());
        }

        assert_eq!(recovered.len(), 50);
        for (parsed, original) in recovered.iter().zip(&contacts) {
            assert_eq!(parsed.first_name, original.first_name);
            assert_eq!(parsed.last_name, original.last_name);
            assert_eq!(parsed.phone, original.phone);
        }
    }

    #[test]
    fn test_first_fit_fills_before_opening_next() {
        let contacts = numbered(50);
        let budget = QrBudget::default();
        let payloads = encode_batch_for_qr(&contacts, budget).unwrap();

        // Every payload but the last is too full to take the next contact.
        let item_len = char_len(&fit_to_budget(QrPayload::from_contact(&contacts[0]), 1998).unwrap());
        for payload in &payloads[..payloads.len() - 1] {
            assert!(char_len(payload) + 1 + item_len > budget.chars());
        }
    }

    #[test]
    fn test_empty_input_gives_no_payloads() {
        assert!(encode_batch_for_qr(&[], QrBudget::default()).unwrap().is_empty());
    }

    #[test]
    fn test_small_set_fits_one_payload() {
        let payloads = encode_batch_for_qr(&numbered(3), QrBudget::default()).unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(decode_batch_from_qr(&payloads[0]).unwrap().len(), 3);
    }

    #[test]
    fn test_contact_too_large_for_any_payload() {
        let mut contacts = numbered(2);
        contacts[1].email = Some("e".repeat(1999));
        let err = encode_batch_for_qr(&contacts, QrBudget::default()).unwrap_err();
        assert!(matches!(err, Error::QrPayloadTooLarge { .. }));
    }
}
