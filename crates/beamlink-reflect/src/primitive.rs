//! Built-in primitive descriptors

use beamlink_host::{FromHost, HostModule, HostResult, HostValue, ToHost};

use crate::descriptor::{Category, Reflect};

macro_rules! primitive {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl Reflect for $ty {
            const CATEGORY: Category = Category::Primitive;

            fn type_name() -> &'static str {
                $name
            }

            fn to_host(&self) -> HostValue {
                ToHost::to_host(self)
            }

            fn from_host(_module: &HostModule, value: HostValue) -> HostResult<Self> {
                <$ty as FromHost>::from_host(value)
            }
        }
    )*};
}

primitive! {
    bool => "bool",
    i8 => "int",
    i16 => "int",
    i32 => "int",
    i64 => "int",
    u8 => "int",
    u16 => "int",
    u32 => "int",
    u64 => "int",
    f32 => "float",
    f64 => "float",
    String => "str",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_copy_across() {
        let module = HostModule::new("test");
        assert_eq!(Reflect::to_host(&2.5f64), HostValue::Float(2.5));
        assert_eq!(<f64 as Reflect>::from_host(&module, HostValue::Int(2)).unwrap(), 2.0);
        assert_eq!(
            <String as Reflect>::from_host(&module, HostValue::from("M1")).unwrap(),
            "M1".to_string()
        );
        assert_eq!(<u32 as Reflect>::type_name(), "int");
        assert_eq!(<bool as Reflect>::CATEGORY, Category::Primitive);
    }

    #[test]
    fn test_out_of_range_integers() {
        let module = HostModule::new("test");
        assert!(<u8 as Reflect>::from_host(&module, HostValue::Int(300)).is_err());
    }
}
