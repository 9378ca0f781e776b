/// `config_struct!`: config sections with field defaults declared inline
///
/// `config_struct!` declares a config section with each field's type and
/// default side by side and generates:
/// - the struct with public fields
/// - a `Default` impl built from the listed defaults
/// - serde support where missing fields fall back to their default and
///   unknown fields are rejected (a typo in config.toml is a fatal error,
///   not a silently ignored key)
///
/// # Example
/// ```ignore
/// config_struct! {
///     pub struct ReportConfig {
///         top_n: usize = 100,
///         console_rows: usize = 20,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default, deny_unknown_fields)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
