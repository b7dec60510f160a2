//! Enum emission.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use schema::EnumDef;

use crate::error::CodegenResult;
use crate::generator::Context;
use crate::naming::{type_ident, variant_ident};

/// Emits a Rust enum with an `Unrecognized(u32)` fallback variant and its
/// conversions.
pub(crate) fn generate_enum(ctx: &Context<'_>, def: &EnumDef) -> CodegenResult<TokenStream> {
    let rt = &ctx.runtime;
    let name = type_ident(&def.name);
    let type_name = def.name.as_str();
    let doc = def.comment.as_deref().map(|comment| quote!(#[doc = #comment]));

    let ordinals = def.ordinals();
    let variants = ordinals.iter().map(|(value, _)| {
        let variant = variant_ident(&value.name);
        let doc = value.comment.as_deref().map(|comment| quote!(#[doc = #comment]));
        quote! {
            #doc
            #variant,
        }
    });
    let from_number = ordinals.iter().map(|(value, ordinal)| {
        let variant = variant_ident(&value.name);
        let ordinal = Literal::u32_unsuffixed(*ordinal);
        quote!(#ordinal => Self::#variant,)
    });
    let to_number = ordinals.iter().map(|(value, ordinal)| {
        let variant = variant_ident(&value.name);
        let ordinal = Literal::u32_unsuffixed(*ordinal);
        quote!(#name::#variant => #ordinal,)
    });
    let names = ordinals.iter().map(|(value, _)| {
        let variant = variant_ident(&value.name);
        let value_name = value.name.as_str();
        quote!(Self::#variant => ::core::result::Result::Ok(#value_name),)
    });
    let default = ordinals.first().map_or_else(
        || quote!(Self::Unrecognized(0)),
        |(value, _)| {
            let variant = variant_ident(&value.name);
            quote!(Self::#variant)
        },
    );

    Ok(quote! {
        #doc
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum #name {
            #(#variants)*
            /// A value with no name in the protocol description.
            Unrecognized(u32),
        }

        impl #name {
            /// The value's name in the protocol description.
            pub fn name(self) -> #rt::EoResult<&'static str> {
                match self {
                    #(#names)*
                    Self::Unrecognized(value) => ::core::result::Result::Err(#rt::EoError::UnrecognizedEnumValue {
                        type_name: #type_name,
                        value,
                    }),
                }
            }
        }

        impl ::core::default::Default for #name {
            fn default() -> Self {
                #default
            }
        }

        impl ::core::convert::From<u32> for #name {
            fn from(value: u32) -> Self {
                match value {
                    #(#from_number)*
                    _ => Self::Unrecognized(value),
                }
            }
        }

        impl ::core::convert::From<#name> for u32 {
            fn from(value: #name) -> Self {
                match value {
                    #(#to_number)*
                    #name::Unrecognized(value) => value,
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::naming::parse_path;
    use schema::{EnumValue, Protocol, ProtocolSet};

    fn emit(def: EnumDef) -> String {
        let set = ProtocolSet::new(vec![Protocol::new("common").enum_def(def.clone())]).unwrap();
        let config = GeneratorConfig::default();
        let ctx = Context {
            set: &set,
            config: &config,
            runtime: parse_path("bytestream").unwrap(),
            package: "common",
        };
        let tokens = generate_enum(&ctx, &def).unwrap();
        syn::parse2::<syn::File>(tokens.clone()).unwrap();
        tokens.to_string()
    }

    #[test]
    fn enum_has_fallback_and_conversions() {
        let source = emit(
            EnumDef::new("Direction", "char")
                .value(EnumValue::new("Down"))
                .value(EnumValue::new("Left").with_value(5)),
        );
        assert!(source.contains("pub enum Direction"));
        assert!(source.contains("Unrecognized (u32)"));
        assert!(source.contains("0 => Self :: Down"));
        assert!(source.contains("5 => Self :: Left"));
        assert!(source.contains("Direction :: Left => 5"));
        assert!(source.contains("UnrecognizedEnumValue"));
    }

    #[test]
    fn first_value_is_default() {
        let source = emit(
            EnumDef::new("Gender", "char")
                .value(EnumValue::new("Female").with_value(1))
                .value(EnumValue::new("Male")),
        );
        assert!(source.contains("fn default () -> Self { Self :: Female }"));
    }

    #[test]
    fn empty_enum_defaults_to_unrecognized() {
        let source = emit(EnumDef::new("Nothing", "byte"));
        assert!(source.contains("Self :: Unrecognized (0)"));
    }
}
