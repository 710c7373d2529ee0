use std::fmt;

/// See: https://github.com/kubernetes/apimachinery/blob/master/pkg/util/intstr/intstr.go
/// IntOrString holds either a port number or a port name.
/// The variant records which form was supplied, so a value read as a name is
/// always written back as a name even when the name looks numeric elsewhere.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum IntOrString {
    Int(i32),
    String(String),
}

impl Default for IntOrString {
    fn default() -> Self {
        IntOrString::Int(0)
    }
}

impl From<i32> for IntOrString {
    fn from(f: i32) -> Self {
        IntOrString::Int(f)
    }
}

impl From<&str> for IntOrString {
    fn from(name: &str) -> Self {
        IntOrString::String(name.to_owned())
    }
}

impl fmt::Display for IntOrString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::String(value) => write!(f, "{}", value),
        }
    }
}

impl<'de> serde::Deserialize<'de> for IntOrString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = IntOrString;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "enum IntOrString")
            }

            fn visit_i32<E>(self, v: i32) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(IntOrString::Int(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                i32::try_from(v).map(IntOrString::Int).map_err(|_| {
                    serde::de::Error::invalid_value(
                        serde::de::Unexpected::Signed(v),
                        &"a 32-bit integer",
                    )
                })
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                i32::try_from(v).map(IntOrString::Int).map_err(|_| {
                    serde::de::Error::invalid_value(
                        serde::de::Unexpected::Unsigned(v),
                        &"a 32-bit integer",
                    )
                })
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_string(v.to_string())
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(IntOrString::String(v))
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

impl serde::Serialize for IntOrString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            IntOrString::Int(i) => i.serialize(serializer),
            IntOrString::String(s) => s.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod test {

    use serde_json::json;

    use crate::IntOrString;

    #[test]
    fn test_int_serde() {
        let int_value = json!(8080);

        let int_or_string: IntOrString =
            serde_json::from_value(int_value.clone()).expect("failed deserialization");
        assert_eq!(int_or_string, IntOrString::Int(8080));
        let serialization = serde_json::to_value(&int_or_string).expect("failed serialization");
        assert_eq!(int_value, serialization);
    }

    #[test]
    fn test_invalid_float_serde() {
        let float_value = json!(2.5);

        let _error = serde_json::from_value::<IntOrString>(float_value)
            .expect_err("float should not be deserialized");
    }

    #[test]
    fn test_too_large_serde() {
        let _error = serde_json::from_value::<IntOrString>(json!(4_294_967_296u64))
            .expect_err("value exceeds i32");
    }

    #[test]
    fn test_str_serde() {
        let str_value = json!("http");

        let int_or_string: IntOrString =
            serde_json::from_value(str_value.clone()).expect("failed deserialization");
        assert_eq!(int_or_string, IntOrString::String("http".into()));

        let serialization = serde_json::to_value(&int_or_string).expect("failed serialization");
        assert_eq!(str_value, serialization);
    }

    #[test]
    fn test_display() {
        assert_eq!(IntOrString::from(80).to_string(), "80");
        assert_eq!(IntOrString::from("web").to_string(), "web");
    }
}
