use super::Language;

/// All localized user-facing strings for a language.
///
/// Both trees share this type, so a key present in one language is present in
/// the other.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    pub nav: NavStrings,
    pub cookie: CookieStrings,
    pub contact: ContactStrings,
    pub footer: FooterStrings,
    pub widget: AccessibilityWidgetStrings,

    /// Label of the language switcher button (names the *other* language)
    pub switch_language_label: &'static str,

    /// Accessible description of the language switcher button
    pub switch_language_aria: &'static str,
}

#[derive(Debug, Clone)]
pub struct NavStrings {
    pub home: &'static str,
    pub about: &'static str,
    pub services: &'static str,
    pub portfolio: &'static str,
    pub contact: &'static str,
}

/// Cookie consent banner copy
#[derive(Debug, Clone)]
pub struct CookieStrings {
    pub title: &'static str,
    pub message: &'static str,
    pub learn_more: &'static str,
    pub privacy: &'static str,
    pub terms: &'static str,
    pub accept: &'static str,
    pub decline: &'static str,
}

/// Contact form labels and transient notifications
#[derive(Debug, Clone)]
pub struct ContactStrings {
    pub your_name: &'static str,
    pub company_name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub project_details: &'static str,
    pub submit: &'static str,
    pub submitting: &'static str,
    pub success_message: &'static str,
    pub error_message: &'static str,
}

#[derive(Debug, Clone)]
pub struct FooterStrings {
    pub tagline: &'static str,
    pub all_rights: &'static str,
    pub privacy_policy: &'static str,
    pub terms_conditions: &'static str,
    pub accessibility_statement: &'static str,
}

/// Labels of the accessibility adjustment panel
#[derive(Debug, Clone)]
pub struct AccessibilityWidgetStrings {
    pub open_panel: &'static str,
    pub title: &'static str,
    pub font_size: &'static str,
    pub high_contrast: &'static str,
    pub grayscale: &'static str,
    pub big_cursor: &'static str,
    pub highlight_links: &'static str,
    pub pause_animations: &'static str,
    pub text_spacing: &'static str,
    pub reset: &'static str,
}

impl LanguageStrings {
    /// Look up the translation tree for a language.
    pub fn for_language(language: Language) -> &'static LanguageStrings {
        if language == Language::HEBREW {
            &HEBREW_STRINGS
        } else {
            &ENGLISH_STRINGS
        }
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    nav: NavStrings {
        home: "Home",
        about: "About",
        services: "Services",
        portfolio: "Portfolio",
        contact: "Contact",
    },
    cookie: CookieStrings {
        title: "We value your privacy",
        message: "We use cookies to improve your browsing experience and analyze site traffic.",
        learn_more: "Learn more in our",
        privacy: "Privacy Policy",
        terms: "Terms",
        accept: "Accept",
        decline: "Decline",
    },
    contact: ContactStrings {
        your_name: "Your Name",
        company_name: "Company Name",
        email: "Email",
        phone: "Phone",
        project_details: "Project Details",
        submit: "Send Message",
        submitting: "Sending...",
        success_message: "Thank you! We'll get back to you within 24 hours.",
        error_message: "Something went wrong while sending your message. Please try again.",
    },
    footer: FooterStrings {
        tagline: "Premium clothing manufacturing since 1994.",
        all_rights: "All rights reserved.",
        privacy_policy: "Privacy Policy",
        terms_conditions: "Terms & Conditions",
        accessibility_statement: "Accessibility Statement",
    },
    widget: AccessibilityWidgetStrings {
        open_panel: "Open accessibility menu",
        title: "Accessibility",
        font_size: "Font size",
        high_contrast: "High contrast",
        grayscale: "Grayscale",
        big_cursor: "Big cursor",
        highlight_links: "Highlight links",
        pause_animations: "Pause animations",
        text_spacing: "Text spacing",
        reset: "Reset settings",
    },
    switch_language_label: "עברית",
    switch_language_aria: "Switch to Hebrew",
};

// ==================== Hebrew Strings ====================

pub const HEBREW_STRINGS: LanguageStrings = LanguageStrings {
    nav: NavStrings {
        home: "בית",
        about: "אודות",
        services: "שירותים",
        portfolio: "פורטפוליו",
        contact: "צור קשר",
    },
    cookie: CookieStrings {
        title: "הפרטיות שלך חשובה לנו",
        message: "אנו משתמשים בעוגיות כדי לשפר את חוויית הגלישה ולנתח את התנועה באתר.",
        learn_more: "למידע נוסף ראו את",
        privacy: "מדיניות הפרטיות",
        terms: "התקנון",
        accept: "אישור",
        decline: "דחייה",
    },
    contact: ContactStrings {
        your_name: "שם מלא",
        company_name: "שם החברה",
        email: "אימייל",
        phone: "טלפון",
        project_details: "פרטי הפרויקט",
        submit: "שליחת הודעה",
        submitting: "שולח...",
        success_message: "תודה! נחזור אליך תוך 24 שעות.",
        error_message: "אירעה שגיאה בשליחת ההודעה. אנא נסה שוב.",
    },
    footer: FooterStrings {
        tagline: "ייצור בגדים פרימיום מאז 1994.",
        all_rights: "כל הזכויות שמורות.",
        privacy_policy: "מדיניות פרטיות",
        terms_conditions: "תקנון האתר",
        accessibility_statement: "הצהרת נגישות",
    },
    widget: AccessibilityWidgetStrings {
        open_panel: "פתח תפריט נגישות",
        title: "נגישות",
        font_size: "גודל גופן",
        high_contrast: "ניגודיות גבוהה",
        grayscale: "גווני אפור",
        big_cursor: "סמן גדול",
        highlight_links: "הדגשת קישורים",
        pause_animations: "עצירת אנימציות",
        text_spacing: "ריווח טקסט",
        reset: "איפוס הגדרות",
    },
    switch_language_label: "English",
    switch_language_aria: "מעבר לאנגלית",
};
