/// Minimum description length, counted in characters
pub const DESCRIPTION_MIN_CHARS: usize = 10;

/// Maximum description length, counted in characters
pub const DESCRIPTION_MAX_CHARS: usize = 500;

// =============================================================================
// USER-FACING MESSAGES
// =============================================================================

pub const DESCRIPTION_TOO_SHORT_MESSAGE: &str = "توضیحات باید حداقل ۱۰ کاراکتر باشد.";

pub const DESCRIPTION_TOO_LONG_MESSAGE: &str = "توضیحات نمی‌تواند بیشتر از ۵۰۰ کاراکتر باشد.";

pub const INVALID_USE_CASE_MESSAGE: &str = "هدف انتخاب‌شده معتبر نیست.";

pub const INVALID_FORMAT_MESSAGE: &str = "قالب خروجی انتخاب‌شده معتبر نیست.";

/// Shown when the language model call fails or returns an unusable reply
pub const GENERATION_FAILED_MESSAGE: &str =
    "ساخت پرامپت بهینه با خطا مواجه شد. لطفاً دوباره تلاش کنید.";

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";
