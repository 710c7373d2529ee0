/// closed set of string values accepted by the api server
pub trait EnumValue: Sized + Copy + 'static {
    const VALUES: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// all accepted spellings, in declaration order
    fn names() -> Vec<&'static str> {
        Self::VALUES.iter().map(|v| v.as_str()).collect()
    }

    /// exact match against the wire spelling
    fn from_exact(value: &str) -> Option<Self> {
        Self::VALUES.iter().copied().find(|v| v.as_str() == value)
    }

    /// ascii case-insensitive match against the wire spelling
    fn from_any_case(value: &str) -> Option<Self> {
        Self::VALUES
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(value))
    }
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $crate::EnumValue for $name {
            const VALUES: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::EnumValue::as_str(self))
            }
        }
    };
}
