use unsynn::*;
use std::result::Result;

keyword! {
    KFn = "fn";
}

unsynn! {
    // attributes, visibility and qualifiers, then the name, generics,
    // arguments and return type
    struct TestFn {
        prefix: Any<Cons<Except<KFn>, TokenTree>>,
        _fn: KFn,
        name: Ident,
        signature: Any<Cons<Except<BraceGroup>, TokenTree>>,
        body: BraceGroup
    }
}

/// What runs before the test body.
enum Setup {
    /// Logging and a default bootstrap.
    Bootstrapped,
    /// Logging only; the test bootstraps with its own configuration.
    NoBootstrap,
}

impl Setup {
    fn from_args(args: TokenStream) -> Result<Setup, &'static str> {
        let args: Vec<TokenTree> = args.into_iter().collect();
        match args.as_slice() {
            [] => Ok(Setup::Bootstrapped),
            [TokenTree::Ident(ident)] if ident == "no_bootstrap" => Ok(Setup::NoBootstrap),
            _ => Err("#[boxing_testhelpers::test] takes no argument or `no_bootstrap`"),
        }
    }

    fn call(&self) -> TokenStream {
        match self {
            Setup::Bootstrapped => quote::quote! { ::boxing_testhelpers::setup(); },
            Setup::NoBootstrap => quote::quote! { ::boxing_testhelpers::init_logging(); },
        }
    }
}

/// Test attribute that installs logging and bootstraps the engine before
/// the test body runs.
///
/// ```ignore
/// #[boxing_testhelpers::test]
/// fn boxes_compare() {
///     assert_eq!(boxing::Boxed::new(1u8), boxing::Boxed::new(1i64));
/// }
/// ```
///
/// Tests that bootstrap with their own configuration pass `no_bootstrap`:
///
/// ```ignore
/// #[boxing_testhelpers::test(no_bootstrap)]
/// fn defaults_only() {
///     boxing::bootstrap_with(boxing::BootstrapConfig::new().numeric_overrides(false));
/// }
/// ```
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let setup = match Setup::from_args(TokenStream::from(attr)) {
        Ok(setup) => setup.call(),
        Err(message) => return quote::quote! { ::core::compile_error!(#message); }.into(),
    };

    let item = TokenStream::from(item);
    let Ok(test_fn) = item.to_token_iter().parse::<TestFn>() else {
        return quote::quote! {
            ::core::compile_error!("#[boxing_testhelpers::test] expects a function");
        }
        .into();
    };

    let TestFn {
        prefix,
        name,
        signature,
        body,
        ..
    } = test_fn;
    let prefix = prefix.to_token_stream();
    let signature = signature.to_token_stream();
    let body = body.0.stream();

    quote::quote! {
        #[::core::prelude::rust_2024::test]
        #prefix fn #name #signature {
            #setup

            #body
        }
    }
    .into()
}
