use std::collections::BTreeSet;

use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, DataStruct, Error, Fields, Ident, Index, Result, Type};

use crate::get_options;

struct RecordField {
	ident: Ident,
	key: String,
	ty: Type,
	with: Option<syn::Path>,
	span: Span,
}

pub fn derive_struct(data: DataStruct, ident: Ident) -> Result<TokenStream> {
	let named = match data.fields {
		Fields::Named(fields) => fields.named,
		Fields::Unit => Default::default(),
		Fields::Unnamed(fields) => {
			return Err(Error::new(
				fields.span(),
				"Deriving `Schema` on tuple structs is not supported",
			))
		}
	};

	let mut fields = named
		.into_iter()
		.map(|field| {
			let options = get_options(&field.attrs)?;
			let span = field.span();
			let ident = field
				.ident
				.ok_or_else(|| Error::new(span, "Missing field name"))?;
			let key = options.rename.unwrap_or_else(|| ident.unraw().to_string());
			Ok(RecordField {
				ident,
				key,
				ty: field.ty,
				with: options.with,
				span,
			})
		})
		.collect::<Result<Vec<_>>>()?;

	// Wire order is ordinal order of keys
	fields.sort_by(|a, b| a.key.as_bytes().cmp(b.key.as_bytes()));

	let mut seen = BTreeSet::new();
	for field in &fields {
		if !seen.insert(field.key.as_str()) {
			return Err(Error::new(
				field.span,
				format!("Duplicate key `{}`", field.key),
			));
		}
	}

	let field_types = fields.iter().map(field_parser_type).collect::<Vec<_>>();
	let field_ctors = fields.iter().map(field_parser_ctor).collect::<Vec<_>>();
	let indexes = (0..fields.len()).map(Index::from).collect::<Vec<_>>();
	let keys = fields.iter().map(|field| &field.key).collect::<Vec<_>>();
	let idents = fields.iter().map(|field| &field.ident).collect::<Vec<_>>();

	// Aliases are required in case of a field called `fields` or `ctx`
	let aliases = idents
		.iter()
		.map(|ident| Ident::new(&format!("val_{}", ident.unraw()), ident.span()))
		.collect::<Vec<_>>();

	Ok(quote! {
		#[automatically_derived]
		impl ::bitshape::Record for #ident {
			type Fields = (#(#field_types,)*);

			fn fields() -> Self::Fields {
				(#(#field_ctors,)*)
			}

			#[allow(unused_variables)]
			fn keys(fields: &Self::Fields) -> ::std::vec::Vec<(&'static str, u32)> {
				::std::vec![#((#keys, ::bitshape::Parser::magic(&fields.#indexes)),)*]
			}

			#[allow(unused_variables)]
			fn encode_fields(
				&self,
				fields: &Self::Fields,
				ctx: &mut ::bitshape::EncodeContext,
			) -> ::bitshape::Result<()> {
				#(ctx.encode(&fields.#indexes, &self.#idents)?;)*
				::std::result::Result::Ok(())
			}

			#[allow(unused_variables)]
			fn decode_fields(
				fields: &Self::Fields,
				ctx: &mut ::bitshape::DecodeContext,
			) -> ::bitshape::Result<Self> {
				#(let #aliases = ctx.decode(&fields.#indexes)?;)*
				::std::result::Result::Ok(Self { #(#idents: #aliases),* })
			}
		}

		#[automatically_derived]
		impl ::bitshape::Schema for #ident {
			type Parser = ::bitshape::RecordParser<Self>;

			fn parser() -> Self::Parser {
				::bitshape::RecordParser::new()
			}
		}
	})
}

fn field_parser_type(field: &RecordField) -> TokenStream {
	let ty = &field.ty;
	match field.with {
		Some(_) => quote_spanned! {field.span=>
			::std::boxed::Box<dyn ::bitshape::Parser<Value = #ty> + ::std::marker::Send + ::std::marker::Sync>
		},
		None => quote_spanned! {field.span=>
			<#ty as ::bitshape::Schema>::Parser
		},
	}
}

fn field_parser_ctor(field: &RecordField) -> TokenStream {
	let ty = &field.ty;
	match &field.with {
		Some(with) => quote_spanned! {field.span=>
			::std::boxed::Box::new(#with()) as ::std::boxed::Box<
				dyn ::bitshape::Parser<Value = #ty> + ::std::marker::Send + ::std::marker::Sync
			>
		},
		None => quote_spanned! {field.span=>
			<#ty as ::bitshape::Schema>::parser()
		},
	}
}
