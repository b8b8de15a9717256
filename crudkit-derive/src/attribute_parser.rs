use syn::parse::Parser;
use syn::{Lit, Meta, punctuated::Punctuated, token::Comma};

/// Options collected from the `#[record(...)]` attributes on one field.
#[derive(Debug, Default)]
pub(crate) struct FieldOptions {
    pub skip: bool,
    pub nested: bool,
    pub rename: Option<String>,
}

/// Parses every `#[record(...)]` attribute on a field.
///
/// Accepted forms: `skip`, `nested` and `rename = "column"`.
pub(crate) fn parse_field_options(field: &syn::Field) -> Result<FieldOptions, syn::Error> {
    let mut options = FieldOptions::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        let Meta::List(meta_list) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected a list, e.g. #[record(nested)]",
            ));
        };
        let metas = Punctuated::<Meta, Comma>::parse_terminated.parse2(meta_list.tokens.clone())?;

        for item in metas {
            match item {
                Meta::Path(path) if path.is_ident("skip") => options.skip = true,
                Meta::Path(path) if path.is_ident("nested") => options.nested = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    else {
                        return Err(syn::Error::new_spanned(
                            &nv.value,
                            "rename expects a string literal",
                        ));
                    };
                    options.rename = Some(s.value());
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unknown record attribute, expected `skip`, `nested` or `rename = \"...\"`",
                    ));
                }
            }
        }
    }

    if options.skip && (options.nested || options.rename.is_some()) {
        return Err(syn::Error::new_spanned(
            field,
            "`skip` cannot be combined with other record attributes",
        ));
    }
    // A nested record contributes its own column names.
    if options.nested && options.rename.is_some() {
        return Err(syn::Error::new_spanned(
            field,
            "`rename` has no effect on a nested record",
        ));
    }

    Ok(options)
}
