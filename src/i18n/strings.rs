/// All localized user-facing strings for a language
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Language Toggle ====================
    /// Confirmation shown after switching to this language
    pub language_switched: &'static str,

    // ==================== Contact Form ====================
    /// Name, phone or message left empty
    pub missing_fields: &'static str,

    /// Phone number is not 9-10 digits
    pub invalid_phone: &'static str,

    /// Email supplied but malformed
    pub invalid_email: &'static str,

    /// Submission acknowledged by the form endpoint
    pub submit_success: &'static str,

    /// Transport failure or non-success acknowledgment
    pub submit_failed: &'static str,

    /// Label on the submit button while the request is in flight
    pub submit_busy: &'static str,

    // ==================== Redirect ====================
    /// Shown when the page is loaded with `?success=1`
    pub redirect_success: &'static str,
}

// ==================== Thai Strings ====================

pub const THAI_STRINGS: LanguageStrings = LanguageStrings {
    language_switched: "เปลี่ยนภาษาเป็นไทยแล้ว",

    missing_fields: "กรุณากรอกข้อมูลที่จำเป็นให้ครบถ้วน",
    invalid_phone: "กรุณากรอกเบอร์โทรศัพท์ให้ถูกต้อง",
    invalid_email: "กรุณากรอกอีเมลให้ถูกต้อง",
    submit_success: "ส่งข้อความเรียบร้อยแล้ว เราจะติดต่อกลับโดยเร็วที่สุด",
    submit_failed: "เกิดข้อผิดพลาดในการส่งข้อความ กรุณาลองใหม่อีกครั้ง",
    submit_busy: "กำลังส่ง...",

    redirect_success: "ส่งข้อความเรียบร้อยแล้ว เราจะติดต่อกลับโดยเร็วที่สุด!",
};

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    language_switched: "Language switched to English",

    missing_fields: "Please fill in all required fields",
    invalid_phone: "Please enter a valid phone number",
    invalid_email: "Please enter a valid email address",
    submit_success: "Message sent. We will get back to you as soon as possible",
    submit_failed: "Something went wrong while sending your message. Please try again",
    submit_busy: "Sending...",

    redirect_success: "Message sent. We will get back to you as soon as possible!",
};
