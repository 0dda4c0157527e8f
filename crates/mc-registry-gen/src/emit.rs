use std::collections::HashSet;

use eyre::{WrapErr, bail, eyre};
use heck::{ToShoutySnakeCase, ToSnakeCase};
use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote};
use tracing::warn;

use crate::pipeline::Artifacts;

const HEADER: &str = "// Auto-generated by mc-registry-gen\n// Do not edit manually\n\n";

/// Keywords that are only valid as raw identifiers.
const RESERVED: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual",
    "where", "while", "yield",
];

/// Modules every generated file contains.
const FIXED_MODULES: &[&str] = &["blocks", "items"];

/// Turn a converted name into an identifier. Names that cannot be raw
/// identifiers (`self`, leading digit, ...) get a leading `_`.
fn ident(name: &str) -> eyre::Result<Ident> {
    if name.starts_with(|c: char| c.is_ascii_digit())
        || matches!(name, "self" | "super" | "crate" | "Self" | "_")
    {
        return ident(&format!("_{name}"));
    }
    let source = if RESERVED.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_owned()
    };
    syn::parse_str::<Ident>(&source).map_err(|_| eyre!("`{name}` is not a valid identifier"))
}

/// Constant name for a registry entry: `snowy_grass_block` -> `SNOWY_GRASS_BLOCK`.
fn const_name(name: &str) -> eyre::Result<Ident> {
    ident(&name.to_shouty_snake_case()).wrap_err_with(|| format!("entry `{name}`"))
}

/// Module name for a registry: `worldgen/biome` -> `worldgen_biome`.
fn module_name(registry: &str) -> eyre::Result<Ident> {
    ident(&registry.to_snake_case()).wrap_err_with(|| format!("registry `{registry}`"))
}

fn byte_array(name: &str, doc: &str, bytes: &[u8]) -> TokenStream {
    let ident = format_ident!("{}", name);
    let len = bytes.len();
    let values = bytes.iter().map(|b| Literal::u8_unsuffixed(*b));
    quote! {
        #[doc = #doc]
        pub static #ident: [u8; #len] = [#(#values),*];
    }
}

fn u16_array(name: &str, doc: &str, values: &[u16]) -> TokenStream {
    let ident = format_ident!("{}", name);
    let len = values.len();
    let values = values.iter().map(|v| Literal::u16_unsuffixed(*v));
    quote! {
        #[doc = #doc]
        pub static #ident: [u16; #len] = [#(#values),*];
    }
}

/// `pub const NAME: ty = value;` for each entry, skipping names that collide
/// after case conversion.
fn constants<'a, I>(module: &str, ty: &TokenStream, entries: I) -> eyre::Result<Vec<TokenStream>>
where
    I: IntoIterator<Item = (&'a str, Literal)>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for (name, value) in entries {
        let ident = const_name(name).wrap_err_with(|| format!("in module `{module}`"))?;
        if !seen.insert(ident.to_string()) {
            warn!(module, entry = name, "duplicate constant name, skipping");
            continue;
        }
        let doc = format!("`{name}`");
        out.push(quote! {
            #[doc = #doc]
            pub const #ident: #ty = #value;
        });
    }
    Ok(out)
}

fn item_to_block_fn(artifacts: &Artifacts) -> TokenStream {
    let arms = artifacts
        .palette
        .item_to_block_table()
        .iter()
        .map(|(item, index)| {
            let item = Literal::u16_unsuffixed(*item);
            let index = Literal::u8_unsuffixed(*index);
            quote! { #item => #index }
        });

    quote! {
        /// Palette index placed by an item. Items without a block map to 0.
        pub const fn item_to_block(item: u16) -> u8 {
            match item {
                #(#arms,)*
                _ => 0,
            }
        }
    }
}

/// Render all artifacts as a Rust module.
pub fn emit(artifacts: &Artifacts) -> eyre::Result<String> {
    let mut items = Vec::new();

    items.push(byte_array(
        "REGISTRIES_BIN",
        "Framed Registry Data packets, concatenated",
        &artifacts.registries.bytes,
    ));
    if let Some(tags) = &artifacts.tags {
        items.push(byte_array("TAGS_BIN", "Framed Update Tags packet", tags));
    }

    let palette = &artifacts.palette;
    let palette_len = palette.len();
    items.push(quote! {
        /// Number of used palette slots; the rest of each table is zero.
        pub const PALETTE_LEN: usize = #palette_len;
    });
    items.push(u16_array(
        "BLOCK_PALETTE",
        "Block state ID of each palette index",
        &palette.state_ids_padded(),
    ));
    items.push(byte_array(
        "NETWORK_BLOCK_PALETTE",
        "BLOCK_PALETTE as 256 VarInts, sent after the palette length of each chunk section",
        &palette.network_palette(),
    ));
    items.push(u16_array(
        "BLOCK_TO_ITEM",
        "Item dropped by each palette index (0 = nothing)",
        &palette.block_to_item_padded(),
    ));
    items.push(item_to_block_fn(artifacts));

    let block_consts = constants(
        "blocks",
        &quote! { u8 },
        palette.entries().iter().enumerate().map(|(i, e)| {
            (e.name.as_str(), Literal::u8_unsuffixed(i as u8))
        }),
    )?;
    let item_consts = constants(
        "items",
        &quote! { u16 },
        artifacts
            .items
            .iter()
            .map(|(name, id)| (name.as_str(), Literal::u16_unsuffixed(id))),
    )?;
    items.push(quote! {
        /// Palette index of each block
        pub mod blocks {
            #(#block_consts)*
        }

        /// Protocol ID of each item
        pub mod items {
            #(#item_consts)*
        }
    });

    let mut modules: HashSet<String> = FIXED_MODULES.iter().map(|m| (*m).to_owned()).collect();
    for (registry, entries) in &artifacts.registries.registries {
        let module = module_name(registry)?;
        if !modules.insert(module.to_string()) {
            bail!("registry `{registry}` would be emitted as module `{module}`, which already exists");
        }
        let doc = format!("Index of each `{registry}` entry");
        let consts = constants(
            registry,
            &quote! { u16 },
            entries
                .iter()
                .enumerate()
                .map(|(i, e)| (e.as_str(), Literal::u16_unsuffixed(i as u16))),
        )?;
        items.push(quote! {
            #[doc = #doc]
            pub mod #module {
                #(#consts)*
            }
        });
    }

    let file: syn::File = syn::parse2(quote! { #(#items)* })?;
    Ok(format!("{HEADER}{}", prettyplease::unparse(&file)))
}
