// Shell composition - which chrome wraps the matched route's output.
//
// The composer only decides; it renders nothing. Chrome order is outermost
// first: persistent navigation, then banners above the outlet, then floating
// siblings appended after it.

use serde::Serialize;

use crate::resolver::PresentationMode;

/// Chrome element around or beside the route outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromeElement {
    /// Persistent navigation sidebar (desktop only).
    Sidebar,
    /// Role preview switcher for super-admins simulating a lower-privilege
    /// role; rendered above the outlet (desktop only).
    RolePreviewBanner,
    /// Always-mounted floating assistant, any authenticated device class.
    AssistantWidget,
    /// Onboarding wizard overlay. Open/close state is owned by the
    /// onboarding provider; the composer only mounts it when told to.
    OnboardingOverlay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellPlan {
    pub chrome: Vec<ChromeElement>,
}

impl ShellPlan {
    /// No chrome at all; the matched route renders standalone.
    pub fn standalone() -> Self {
        Self { chrome: Vec::new() }
    }
}

/// Decide the chrome for a mode/device combination.
pub fn compose(mode: PresentationMode, is_mobile: bool, show_onboarding: bool) -> ShellPlan {
    if !mode.is_authenticated_app() {
        return ShellPlan::standalone();
    }

    let mut chrome = Vec::new();
    if !is_mobile {
        chrome.push(ChromeElement::Sidebar);
        chrome.push(ChromeElement::RolePreviewBanner);
    }
    chrome.push(ChromeElement::AssistantWidget);
    if show_onboarding {
        chrome.push(ChromeElement::OnboardingOverlay);
    }

    ShellPlan { chrome }
}
