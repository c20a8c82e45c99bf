pub const GENERIC_DISCLAIMER: &str = "Results may vary. Consult a qualified professional to find out whether this treatment is right for you.";

pub const SKINCARE_DISCLAIMER: &str = "Results may vary by skin type and condition. Consult a licensed skincare professional before starting any new treatment.";

pub const INJECTABLES_DISCLAIMER: &str = "Injectable treatments must be administered by a licensed medical professional. Results vary and temporary side effects such as swelling or bruising may occur. Consultation required.";

pub const LASER_DISCLAIMER: &str = "Laser treatments should be performed by trained, certified professionals. Multiple sessions may be required and results vary by skin type. Avoid sun exposure before and after treatment.";

pub const ANTIAGING_DISCLAIMER: &str = "Anti-aging results vary between individuals and are not permanent. A consultation is required to determine the most suitable treatment plan.";

pub const BODY_DISCLAIMER: &str = "Body contouring treatments are not a substitute for weight loss. Results vary and depend on individual factors and lifestyle. Consultation required.";

pub const WELLNESS_DISCLAIMER: &str = "Wellness treatments are not intended to diagnose, treat, or cure any disease. Consult your physician before starting any new wellness program.";

/// Exact, case-sensitive lookup; anything outside the table gets the generic text.
pub fn disclaimer_for(treatment_category: &str) -> &'static str {
    match treatment_category {
        "skincare" => SKINCARE_DISCLAIMER,
        "injectables" => INJECTABLES_DISCLAIMER,
        "laser" => LASER_DISCLAIMER,
        "antiaging" => ANTIAGING_DISCLAIMER,
        "body" => BODY_DISCLAIMER,
        "wellness" => WELLNESS_DISCLAIMER,
        _ => GENERIC_DISCLAIMER,
    }
}
