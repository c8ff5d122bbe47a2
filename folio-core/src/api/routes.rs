macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API route definitions shared by the server and its clients
pub mod v1 {
    pub mod themes {
        pub const COLLECTION: &str = v1_path!("/themes");
        pub const VARIABLES: &str = v1_path!("/themes/variables");
        pub const PREVIEW: &str = v1_path!("/themes/{name}/preview");
    }

    pub mod settings {
        pub const THEME: &str = v1_path!("/settings/theme");
        pub const THEME_EVENTS: &str = v1_path!("/settings/theme/events");
    }
}

/// Routes served outside the versioned API.
pub mod site {
    pub const STYLESHEET: &str = "/theme.css";
    pub const PING: &str = "/ping";
    pub const HEALTH: &str = "/health";
}

/// Fill `{param}` placeholders in a route template.
pub fn with_param(template: &str, name: &str, value: &str) -> String {
    template.replace(&format!("{{{name}}}"), value)
}
