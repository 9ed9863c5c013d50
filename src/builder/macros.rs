//! Macros for ergonomic state identifier definitions.

/// Generate a `State` implementation for a plain enum.
///
/// Each variant gets a path-segment name, used by `SegmentCodec` and in
/// logs. Names default to the variant identifier; override with `= "name"`.
///
/// # Example
///
/// ```
/// use navstate::core::State;
/// use navstate::state_enum;
///
/// state_enum! {
///     pub enum Screen {
///         Inbox = "inbox",
///         Settings = "settings",
///         Compose,
///     }
/// }
///
/// assert_eq!(Screen::Inbox.name(), "inbox");
/// assert_eq!(Screen::Compose.name(), "Compose");
/// assert_eq!(Screen::from_name("settings"), Some(Screen::Settings));
/// ```
#[macro_export]
macro_rules! state_enum {
    (@segment $variant:ident $segment:literal) => {
        $segment
    };

    (@segment $variant:ident) => {
        stringify!($variant)
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $segment:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::state_enum!(@segment $variant $($segment)?)),*
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                $(
                    if name == $crate::state_enum!(@segment $variant $($segment)?) {
                        return Some(Self::$variant);
                    }
                )*
                None
            }
        }
    };
}
