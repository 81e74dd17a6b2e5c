//! Static feature registry.
//!
//! Tier lists are cumulative: every feature of a lower tier is repeated in
//! each higher tier. Nothing enforces this at runtime; the tests do.

use serde::Serialize;

use tierpass_core::Tier;

/// Display metadata for a gated feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureDetails {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

const FREE: &[&str] = &["basic_analytics_view", "content_preview", "limited_reports"];

const BASIC: &[&str] = &[
    "basic_analytics_view",
    "advanced_analytics",
    "content_preview",
    "content_creation",
    "limited_reports",
    "standard_reports",
    "export_csv",
];

const PREMIUM: &[&str] = &[
    "basic_analytics_view",
    "advanced_analytics",
    "real_time_analytics",
    "content_preview",
    "content_creation",
    "content_editing",
    "ai_content_generation",
    "limited_reports",
    "standard_reports",
    "advanced_reports",
    "export_csv",
    "export_pdf",
    "custom_reports",
    "api_access",
];

/// Every known feature, in display order.
pub(crate) const FEATURES: &[FeatureDetails] = &[
    FeatureDetails {
        id: "basic_analytics_view",
        name: "Basic Analytics",
        description: "View basic traffic and usage statistics",
        icon: "📊",
    },
    FeatureDetails {
        id: "advanced_analytics",
        name: "Advanced Analytics",
        description: "Detailed metrics, trends, and insights",
        icon: "📈",
    },
    FeatureDetails {
        id: "real_time_analytics",
        name: "Real-time Analytics",
        description: "Live data updates and monitoring",
        icon: "⚡",
    },
    FeatureDetails {
        id: "content_preview",
        name: "Content Preview",
        description: "Preview content before publishing",
        icon: "👁️",
    },
    FeatureDetails {
        id: "content_creation",
        name: "Content Creation",
        description: "Create and save content",
        icon: "✍️",
    },
    FeatureDetails {
        id: "content_editing",
        name: "Advanced Editing",
        description: "Full content editing capabilities",
        icon: "✏️",
    },
    FeatureDetails {
        id: "ai_content_generation",
        name: "AI Content Generation",
        description: "Generate content using AI",
        icon: "🤖",
    },
    FeatureDetails {
        id: "limited_reports",
        name: "Limited Reports",
        description: "Basic report viewing (last 7 days)",
        icon: "📄",
    },
    FeatureDetails {
        id: "standard_reports",
        name: "Standard Reports",
        description: "Monthly reports with basic metrics",
        icon: "📋",
    },
    FeatureDetails {
        id: "advanced_reports",
        name: "Advanced Reports",
        description: "Custom date ranges and detailed metrics",
        icon: "📊",
    },
    FeatureDetails {
        id: "export_csv",
        name: "CSV Export",
        description: "Export data to CSV format",
        icon: "📑",
    },
    FeatureDetails {
        id: "export_pdf",
        name: "PDF Export",
        description: "Export reports to PDF",
        icon: "📕",
    },
    FeatureDetails {
        id: "custom_reports",
        name: "Custom Reports",
        description: "Build custom reports with filters",
        icon: "🔧",
    },
    FeatureDetails {
        id: "api_access",
        name: "API Access",
        description: "Programmatic access to your data",
        icon: "🔌",
    },
];

/// Feature ids unlocked by `tier`.
pub fn tier_features(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Free => FREE,
        Tier::Basic => BASIC,
        Tier::Premium => PREMIUM,
    }
}

pub fn feature_details(feature_id: &str) -> Option<&'static FeatureDetails> {
    FEATURES.iter().find(|f| f.id == feature_id)
}
