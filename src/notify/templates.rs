//! Status-keyed notification templates
//!
//! Selection is a pure lookup by exact status string; anything outside the
//! canonical set (including "no status yet", i.e. order creation) falls
//! back to the `default` template. Bodies carry a `{tracking_url}`
//! placeholder substituted at compose time.

/// Subject and HTML body for one notification.
pub struct Template {
    pub subject: &'static str,
    pub body: &'static str,
}

pub const DEFAULT: Template = Template {
    subject: "Your Delivery Order Has Been Submitted",
    body: "\
<p>Your delivery order has been successfully created.</p>\n\
<p>You can track the status of your package using your Order ID. {tracking_url}</p>",
};

const FIRST_MILE: Template = Template {
    subject: "Your Package Has Been Received at First Mile",
    body: "\
<p>Your delivery order has been received and is being processed at the origin facility.</p>\n\
<p>We'll update you with the next steps soon. {tracking_url}</p>",
};

const IN_FACILITY: Template = Template {
    subject: "Package Arrived at Sorting Facility",
    body: "\
<p>Your package has successfully reached our sorting facility.</p>\n\
<p>We are preparing it for the next phase of delivery. {tracking_url}</p>",
};

const OUT_FOR_DELIVERY: Template = Template {
    subject: "Out for Delivery - Your Package is on the Way!",
    body: "\
<p>Exciting news! Your package is out for delivery and will arrive soon.</p>\n\
<p>Please keep your contact number available for the delivery personnel. {tracking_url}</p>",
};

const DELIVERED: Template = Template {
    subject: "Delivery Complete - Thank You!",
    body: "\
<p>Your package has been successfully delivered.</p>\n\
<p>Thank you for choosing our service. We hope to serve you again soon! {tracking_url}</p>",
};

/// Select the template for a status string, falling back to [`DEFAULT`].
pub fn for_status(status: Option<&str>) -> &'static Template {
    match status {
        Some("FIRST MILE RECEIVE SCAN") => &FIRST_MILE,
        Some("RECEIVED IN FACILITY") => &IN_FACILITY,
        Some("OUT FOR DELIVERY") => &OUT_FOR_DELIVERY,
        Some("DELIVERED") => &DELIVERED,
        _ => &DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeliveryStatus;

    #[test]
    fn every_canonical_status_has_its_own_template() {
        let mut subjects: Vec<&str> = DeliveryStatus::ALL
            .iter()
            .map(|status| for_status(Some(status.as_str())).subject)
            .collect();
        subjects.push(DEFAULT.subject);
        subjects.sort();
        subjects.dedup();
        assert_eq!(subjects.len(), 5);
    }

    #[test]
    fn unknown_or_missing_status_falls_back_to_default() {
        assert_eq!(for_status(Some("SHIPPED")).subject, DEFAULT.subject);
        assert_eq!(for_status(Some("delivered")).subject, DEFAULT.subject);
        assert_eq!(for_status(None).subject, DEFAULT.subject);
    }

    #[test]
    fn bodies_carry_the_tracking_placeholder() {
        for status in DeliveryStatus::ALL {
            assert!(
                for_status(Some(status.as_str()))
                    .body
                    .contains("{tracking_url}")
            );
        }
        assert!(DEFAULT.body.contains("{tracking_url}"));
    }
}
