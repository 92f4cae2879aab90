use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, DataEnum, Error, Fields, Ident, Result};

use crate::get_options;

pub fn derive_enum(data: DataEnum, ident: Ident) -> Result<TokenStream> {
	if data.variants.is_empty() {
		return Err(Error::new(
			ident.span(),
			"Deriving `Schema` on enums with no variants is not supported",
		));
	}

	let mut variants = Vec::with_capacity(data.variants.len());
	let mut seen = BTreeSet::new();
	for variant in data.variants {
		if !matches!(variant.fields, Fields::Unit) {
			return Err(Error::new(
				variant.fields.span(),
				"Deriving `Schema` is only supported on enums whose variants have no fields",
			));
		}
		let options = get_options(&variant.attrs)?;
		if options.with.is_some() {
			return Err(Error::new(variant.span(), "`with` is not supported on variants"));
		}
		let label = options.rename.unwrap_or_else(|| variant.ident.unraw().to_string());
		if !seen.insert(label.clone()) {
			return Err(Error::new(variant.span(), format!("Duplicate label `{label}`")));
		}
		variants.push((variant.ident, label));
	}

	let idents = variants.iter().map(|(ident, _)| ident).collect::<Vec<_>>();
	let labels = variants.iter().map(|(_, label)| label).collect::<Vec<_>>();

	Ok(quote! {
		#[automatically_derived]
		impl ::bitshape::EnumValue for #ident {
			fn label(&self) -> ::std::borrow::Cow<'_, str> {
				match self {
					#(Self::#idents => ::std::borrow::Cow::Borrowed(#labels),)*
				}
			}

			fn to_value(&self) -> ::bitshape::Value {
				::bitshape::Value::Text(::bitshape::EnumValue::label(self).into_owned())
			}

			fn from_value(value: &::bitshape::Value) -> ::std::option::Option<Self> {
				match value.as_str()? {
					#(#labels => ::std::option::Option::Some(Self::#idents),)*
					_ => ::std::option::Option::None,
				}
			}
		}

		#[automatically_derived]
		impl ::bitshape::Schema for #ident {
			type Parser = ::bitshape::EnumParser<Self>;

			fn parser() -> Self::Parser {
				::bitshape::EnumParser::new([#(Self::#idents),*])
			}
		}
	})
}
