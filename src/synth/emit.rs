//! Token emission for generated modules.

use fixturegen_core::{GeneratedSuite, NameStyle, SuiteEntry, TestCaseName};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::config::SuiteConfig;

pub(super) fn emit_module(config: &SuiteConfig, suite: &GeneratedSuite, hook: &syn::Path) -> TokenStream {
    let allow = match config.naming {
        NameStyle::Camel => quote! { #![allow(non_snake_case)] },
        NameStyle::Snake => TokenStream::new(),
    };
    let manifest = emit_manifest(config, suite);
    let run_test = emit_run_test(hook, suite.is_empty());
    let completeness = emit_completeness_entry(suite.completeness_entry());
    let entries = suite.entries().iter().map(|entry| emit_fixture_entry(config, entry));

    quote! {
        #allow
        #manifest
        #run_test
        #completeness
        #(#entries)*
    }
}

fn emit_manifest(config: &SuiteConfig, suite: &GeneratedSuite) -> TokenStream {
    let name = &config.name;
    let root = config.normalized_root();
    let pattern = &config.pattern;
    let backend = &config.backend;
    let exclude_dirs = &config.exclude_dirs;
    let ignore = &config.ignore;
    let fixtures = suite.entries().iter().map(|entry| {
        let test_name = entry.name.as_str();
        let path = entry.fixture.relative_path();
        quote! { (#test_name, #path) }
    });

    quote! {
        /// Fixtures this module was generated from.
        pub const SUITE: ::fixturegen::runtime::SuiteManifest = ::fixturegen::runtime::SuiteManifest {
            name: #name,
            manifest_dir: env!("CARGO_MANIFEST_DIR"),
            root: #root,
            pattern: #pattern,
            backend: #backend,
            exclude_dirs: &[#(#exclude_dirs),*],
            ignore: &[#(#ignore),*],
            fixtures: &[#(#fixtures),*],
        };
    }
}

/// Always emitted so the hook stays referenced; unused (and allowed so) while the suite is empty.
fn emit_run_test(hook: &syn::Path, unused: bool) -> TokenStream {
    let allow = if unused {
        quote! { #[allow(dead_code)] }
    } else {
        TokenStream::new()
    };
    quote! {
        #allow
        fn run_test(path: &str) -> ::fixturegen::runtime::Outcome {
            #hook(path, SUITE.backend)
        }
    }
}

fn emit_completeness_entry(name: &TestCaseName) -> TokenStream {
    let ident = format_ident!("{}", name.as_str());
    quote! {
        #[test]
        fn #ident() {
            ::fixturegen::runtime::assert_all_fixtures_present(&SUITE);
        }
    }
}

fn emit_fixture_entry(config: &SuiteConfig, entry: &SuiteEntry) -> TokenStream {
    let ident = format_ident!("{}", entry.name.as_str());
    let doc = format!(" Fixture: `{}`", entry.fixture.relative_path());
    let path = config.hook_path(entry.fixture.relative_path());

    quote! {
        #[doc = #doc]
        #[test]
        fn #ident() -> ::fixturegen::runtime::Outcome {
            run_test(#path)
        }
    }
}
