#![warn(clippy::pedantic)]

use ariadne::{
    Config,
    Label,
    Report,
    ReportKind,
    Source,
};
use chumsky::{
    error::{
        Simple,
        SimpleReason,
    },
    primitive::end,
    Parser,
};
use kmpz_common::prefix_function;
use proc_macro::TokenStream;
use proc_macro2::{
    Literal,
    Span,
    TokenStream as TokenStream2,
};
use quote::{
    ToTokens,
    TokenStreamExt as _,
};
use syn::{
    parenthesized,
    parse::{
        Parse,
        ParseStream,
        Result as ParseResult,
    },
    parse_macro_input,
    Ident,
    LitStr,
    Token,
    Visibility,
};

macro_rules! unsuffixed_primitive {
    ($type:ident: $primitive:ident => $method:ident) => {
        struct $type($primitive);

        impl ToTokens for $type {
            fn to_tokens(&self, tokens: &mut TokenStream2) {
                tokens.append(Literal::$method(self.0))
            }
        }

        impl From<$primitive> for $type {
            fn from(value: $primitive) -> Self {
                Self(value)
            }
        }
    };
}

unsuffixed_primitive!(UnsuffixedUsize: usize => usize_unsuffixed);
unsuffixed_primitive!(UnsuffixedU8: u8 => u8_unsuffixed);

enum Method {
    Hex,
}

impl TryFrom<Ident> for Method {
    type Error = syn::Error;

    fn try_from(value: Ident) -> Result<Self, Self::Error> {
        match value.to_string().as_str() {
            "hex" => Ok(Self::Hex),
            _ => Err(syn::Error::new(value.span(), "expected one of: `hex`")),
        }
    }
}

struct NeedleDecl {
    visibility: Visibility,
    name: Ident,
    method: Method,
    pattern: String,
}

impl NeedleDecl {
    #[must_use]
    fn into_tokens(self) -> TokenStream2 {
        let parse_result = match self.method {
            Method::Hex => kmpz_common::hex_pattern()
                .then_ignore(end())
                .parse(self.pattern.as_str()),
        };

        match parse_result {
            Ok(bytes) => self.tokenize_needle(&bytes),
            Err(errors) => self.tokenize_errors(&errors),
        }
    }

    #[must_use]
    fn tokenize_needle(&self, bytes: &[u8]) -> TokenStream2 {
        let needle_len: UnsuffixedUsize = bytes.len().into();
        let pattern: TokenStream2 = bytes
            .iter()
            .map(|&x| {
                let x = UnsuffixedU8(x);
                quote::quote!(#x,)
            })
            .collect();
        let table: TokenStream2 = prefix_function(bytes)
            .into_iter()
            .map(|x| {
                let x = UnsuffixedUsize(x);
                quote::quote!(#x,)
            })
            .collect();
        let Self {
            visibility, name, ..
        } = self;
        quote::quote! {
            #visibility const #name: ::kmpz_common::StaticNeedle<#needle_len> =
                ::kmpz_common::StaticNeedle::new([#pattern], [#table]);
        }
    }

    #[must_use]
    fn tokenize_errors(&self, errors: &[Simple<char>]) -> TokenStream2 {
        let error = errors.first().unwrap();
        let mut buffer = Vec::new();
        Report::build(ReportKind::Error, (), error.span().start)
            .with_config(Config::default().with_color(false))
            .with_message(error.to_string())
            .with_label(Label::new(error.span()).with_message(match error.reason() {
                SimpleReason::Unexpected => "unexpected input",
                SimpleReason::Unclosed {
                    span: _,
                    delimiter: _,
                } => "unclosed delimiter",
                SimpleReason::Custom(custom) => custom.as_str(),
            }))
            .finish()
            .write(Source::from(&self.pattern), &mut buffer)
            .unwrap();
        let error_message = String::from_utf8(buffer).unwrap();
        quote::quote_spanned!(Span::call_site() => compile_error!(#error_message))
    }
}

impl Parse for NeedleDecl {
    fn parse(input: ParseStream) -> ParseResult<Self> {
        let visibility = input.parse()?;
        input.parse::<Token![const]>()?;
        let name = input.parse()?;
        input.parse::<Token![=]>()?;
        let method = input.parse::<Ident>()?.try_into()?;
        let pattern = {
            let content;
            parenthesized!(content in input);
            content.parse::<LitStr>()?.value()
        };
        input.parse::<Token![;]>()?;
        Ok(Self {
            visibility,
            name,
            method,
            pattern,
        })
    }
}

struct NeedleDecls(Vec<NeedleDecl>);

impl Parse for NeedleDecls {
    fn parse(input: ParseStream) -> ParseResult<Self> {
        let mut decls = Vec::new();
        while !input.is_empty() {
            decls.push(input.parse()?);
        }
        Ok(Self(decls))
    }
}

/// Parses, validates, and constructs [`Needle`](kmpz_common::Needle)s at compile-time.
///
/// The pattern is parsed and its failure table computed during macro
/// expansion, so matching at runtime starts with zero setup cost.
///
/// ## Syntax
/// Expects one or more declarations of the form: `$VISIBILITY? const $IDENTIFIER = $METHOD("$PATTERN");`
///
/// With the following rules:
/// * `$VISIBILITY` is a valid [Visibility](<https://doc.rust-lang.org/reference/visibility-and-privacy.html>) token, or nothing.
/// * `$IDENTIFIER` is a valid [Identifier](<https://doc.rust-lang.org/reference/identifiers.html>) token.
/// * `$METHOD` is one of:
///   * `hex`.
/// * `$PATTERN` is a valid pattern whose syntax depends on the chosen `$METHOD`.
///
/// ## Example
/// ```
/// # use kmpz_macros::needle;
/// # use kmpz_common::Needle as _;
/// needle! {
///     const NEEDLE = hex("78 9A BC");
/// }
/// let haystack = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE];
/// let matched = NEEDLE.find(&haystack).unwrap();
/// assert_eq!(matched.as_bytes(), [0x78, 0x9A, 0xBC]);
/// ```
#[proc_macro]
pub fn needle(input: TokenStream) -> TokenStream {
    let decls = parse_macro_input!(input as NeedleDecls);
    decls
        .0
        .into_iter()
        .map(NeedleDecl::into_tokens)
        .collect::<TokenStream2>()
        .into()
}
