// #[reflect(...)] attribute parsing
//
// Container:   #[reflect(name = "Source")]
// Field:       #[reflect(rename = "worldPosition")], #[reflect(skip)],
//              #[reflect(default = <expr>)]
// Enum member: #[reflect(rename = "HARD_EDGE")]

use syn::{Attribute, Expr, LitStr, Result};

/// Attributes on the deriving type
#[derive(Default)]
pub struct ContainerAttrs {
    pub name: Option<String>,
}

/// Attributes on a struct field or enum member
#[derive(Default)]
pub struct MemberAttrs {
    pub rename: Option<String>,
    pub skip: bool,
    pub default: Option<Expr>,
}

pub fn container_attrs(attrs: &[Attribute]) -> Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("reflect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.name = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unknown container attribute; expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(parsed)
}

pub fn member_attrs(attrs: &[Attribute]) -> Result<MemberAttrs> {
    let mut parsed = MemberAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("reflect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.rename = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else if meta.path.is_ident("default") {
                parsed.default = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown member attribute; expected `rename`, `skip` or `default`"))
            }
        })?;
    }
    Ok(parsed)
}

/// `HardEdge` -> `HARD_EDGE`, `EV` -> `EV`, `Xyz2Abc` -> `XYZ2_ABC`
pub fn screaming_snake(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screaming_snake() {
        assert_eq!(screaming_snake("Vacuum"), "VACUUM");
        assert_eq!(screaming_snake("HardEdge"), "HARD_EDGE");
        assert_eq!(screaming_snake("SeparateEnergies"), "SEPARATE_ENERGIES");
        assert_eq!(screaming_snake("EV"), "EV");
        assert_eq!(screaming_snake("HTTPServer"), "HTTP_SERVER");
        assert_eq!(screaming_snake("Path2Event"), "PATH2_EVENT");
    }

    #[test]
    fn test_member_attrs() {
        let field: syn::Field = syn::parse_quote! {
            #[reflect(rename = "worldPosition", default = 1.5)]
            pub world_position: f64
        };
        let attrs = member_attrs(&field.attrs).unwrap();
        assert_eq!(attrs.rename.as_deref(), Some("worldPosition"));
        assert!(attrs.default.is_some());
        assert!(!attrs.skip);
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let field: syn::Field = syn::parse_quote! {
            #[reflect(hidden)]
            pub x: f64
        };
        assert!(member_attrs(&field.attrs).is_err());
    }
}
