use proc_macro2::TokenStream;
use syn::{
	parse_macro_input, spanned::Spanned, Attribute, Data, DeriveInput, Error, Lit, Meta, MetaNameValue,
	NestedMeta, Result,
};

mod structs;
use structs::derive_struct;
mod enums;
use enums::derive_enum;

#[proc_macro_derive(Schema, attributes(schema))]
pub fn schema(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	schema_impl(input)
		.unwrap_or_else(Error::into_compile_error)
		.into()
}

fn schema_impl(input: DeriveInput) -> Result<TokenStream> {
	if !input.generics.params.is_empty() {
		return Err(Error::new(
			input.generics.span(),
			"Deriving `Schema` on generic types is not supported",
		));
	}

	match input.data {
		Data::Struct(data) => derive_struct(data, input.ident),
		Data::Enum(data) => derive_enum(data, input.ident),
		Data::Union(data) => Err(Error::new(
			data.union_token.span(),
			"Deriving `Schema` on unions is not supported",
		)),
	}
}

/// Options from `#[schema(...)]` attributes on a field or variant.
#[derive(Default)]
struct Options {
	rename: Option<String>,
	with: Option<syn::Path>,
}

fn get_options(attrs: &[Attribute]) -> Result<Options> {
	let mut options = Options::default();

	for attr in attrs.iter().filter(|attr| attr.path.is_ident("schema")) {
		let nested = match attr.parse_meta()? {
			Meta::List(list) => list.nested,
			meta => return Err(Error::new(meta.span(), "Expected `#[schema(...)]`")),
		};

		for item in nested {
			let (path, lit) = match item {
				NestedMeta::Meta(Meta::NameValue(MetaNameValue { path, lit, .. })) => (path, lit),
				item => return Err(Error::new(item.span(), "Expected `name = \"value\"`")),
			};
			let value = match lit {
				Lit::Str(value) => value,
				lit => return Err(Error::new(lit.span(), "Expected a string literal")),
			};

			if path.is_ident("rename") {
				if options.rename.is_some() {
					return Err(Error::new(path.span(), "Duplicate `rename`"));
				}
				options.rename = Some(value.value());
			} else if path.is_ident("with") {
				if options.with.is_some() {
					return Err(Error::new(path.span(), "Duplicate `with`"));
				}
				options.with = Some(value.parse()?);
			} else {
				return Err(Error::new(path.span(), "Unknown `schema` option"));
			}
		}
	}

	Ok(options)
}
