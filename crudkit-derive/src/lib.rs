//! `#[derive(Record)]`: generates the field descriptor that crudkit walks when it turns a
//! record into query-by-example predicates.
//!
//! ```rust,ignore
//! #[derive(Record)]
//! pub struct Seat {
//!     #[record(skip)]
//!     pub id: i32,
//!     pub seat_pos: String,
//!     #[record(nested)]
//!     pub booking: BookingWindow,
//! }
//! ```
//!
//! Scalar fields are converted with `Into<sea_orm::Value>`, so a field whose type storage
//! cannot bind is rejected at compile time.

mod attribute_parser;

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

use attribute_parser::parse_field_options;

#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_record(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let name = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "Record can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            name,
            "Record only supports structs with named fields",
        ));
    };

    let mut entries = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let options = parse_field_options(field)?;
        if options.skip {
            continue;
        }
        let Some(ident) = &field.ident else { continue };
        let column = options
            .rename
            .unwrap_or_else(|| ident.unraw().to_string());

        entries.push(if options.nested {
            quote! { ::crudkit::record::Field::nested(#column, &self.#ident) }
        } else {
            quote! {
                ::crudkit::record::Field::scalar(#column, ::std::clone::Clone::clone(&self.#ident))
            }
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::crudkit::record::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::crudkit::record::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}
