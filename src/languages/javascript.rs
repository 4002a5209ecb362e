//! JavaScript, JSX, TypeScript and TSX are covered by this grammar.
//!
//! This also highlights Flow-style type annotations.
//!
//! Everything here is plain grammar configuration built from the engine's
//! rule constructors; the only state is the lazily compiled [`Language`]
//! shared by [`Registry::with_builtins`](crate::engine::Registry).

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::engine::grammar::{GrammarBuilder, GrammarError};
use crate::engine::language::Language;
use crate::engine::rule::{
    any, either, look_ahead, optional, pattern, scan, seq, word, words, zero_or_more, Rule,
};

const KEYWORDS: &[&str] = &[
    "abstract",
    "any",
    "as",
    "async",
    "await",
    "boolean",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "constructor",
    "continue",
    "debugger",
    "declare",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "finally",
    "for",
    "from",
    "function",
    "get",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "module",
    "namespace",
    "new",
    "number",
    "of",
    "package",
    "private",
    "protected",
    "public",
    "require",
    "return",
    "set",
    "static",
    "string",
    "switch",
    "symbol",
    "throw",
    "try",
    "type",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

const LITERALS: &[&str] = &["false", "NaN", "null", "super", "this", "true", "undefined"];

/// Tokenizer patterns, most specific first. Multi-character operators must
/// precede their prefixes, and the final `.` catch-all guarantees every
/// input character becomes a token.
const PATTERNS: &[&str] = &[
    "===|!==|==|!=|>=|<=",
    r"&&|\|\|",
    ">>>|>>|<<|/>|</",
    r"\+=|\*=|/=|%=",
    r"\$\{",
    r"\+\+|--",
    r"/\*|\*/|//",
    r"[a-zA-Z\u{00C0}-\u{017F}0-9_]+",
    r"[\t \r]+|\n",
    ".",
];

const ID_PATTERN: &str = r"[a-zA-Z\u{00C0}-\u{017F}_][a-zA-Z\u{00C0}-\u{017F}_0-9]*";

fn kw(token: &str) -> Rule {
    word(token).tag("keyword")
}

fn op(token: &str) -> Rule {
    word(token).tag("operator")
}

/// Build the JS/TS/JSX language. Compiled once by [`shared`].
pub fn language() -> Result<Language, GrammarError> {
    let mut b = GrammarBuilder::new();

    // Forward declarations for the mutually recursive rules
    let toplevel = b.placeholder();
    let object_literal = b.placeholder();
    let type_decl = b.placeholder();
    let arguments = b.placeholder();

    let id = b.compile(pattern(ID_PATTERN))?;

    let char_escape = b.compile(seq([word("\\"), pattern(".")]).tag("char-escape"))?;

    let number = seq([
        pattern("^[0-9]+$"),
        optional(seq([op("."), pattern("^[0-9]+$")])),
    ])
    .tag("number");

    let simple_string = b.compile(
        either([
            seq([word("\""), scan(char_escape).until("\"")]),
            seq([word("'"), scan(char_escape).until("'")]),
        ])
        .tag("string"),
    )?;

    let interpolation = seq([
        op("${"),
        scan(toplevel)
            .until(look_ahead(word("}")))
            .tag("toplevel typescript"),
        op("}"),
    ])
    .tag("typescript");
    let template_string = seq([op("`"), scan(interpolation).until(op("`"))]).tag("string template-string");

    let string = either([Rule::from(simple_string), template_string]);

    let comment = either([
        seq([word("//"), scan(any()).until(look_ahead(word("\n")))]),
        seq([word("/*"), scan(any()).until(word("*/"))]),
    ])
    .tag("comment");

    let code_block = b.compile(seq([
        op("{"),
        scan(toplevel).until(look_ahead(op("}"))),
        op("}"),
    ]))?;

    let dotted_name = b.compile(seq([
        Rule::from(id),
        zero_or_more(seq([op("."), Rule::from(id)])),
    ]))?;

    // Swallows properties that would otherwise highlight as keywords
    let dotted_guard = seq([
        op("."),
        either([
            seq([Rule::from(id).tag("function-call"), look_ahead(op("("))]),
            Rule::from(id),
        ]),
    ]);

    let decorator = seq([op("@"), Rule::from(dotted_name).tag("tag-name")]).tag("decorator");

    let object_property = b.compile(seq([
        either([Rule::from(id), Rule::from(simple_string)]).tag("property"),
        optional(op("?")),
        op(":"),
    ]))?;

    let method = b.compile(seq([
        Rule::from(id).tag("function method"),
        Rule::from(arguments),
        either([Rule::from(code_block), op(";")]),
    ]))?;

    let class_property = seq([Rule::from(object_property), optional(Rule::from(type_decl))]);

    let type_body = b.compile(seq([
        op("{"),
        scan(either([
            decorator,
            Rule::from(method),
            class_property,
            Rule::from(toplevel),
        ]))
        .until(look_ahead(op("}"))),
        op("}"),
    ]))?;

    b.define(
        type_decl,
        seq([
            either([
                seq([
                    Rule::from(id),
                    optional(seq([op("<"), Rule::from(type_decl), op(">")])),
                    optional(seq([word("["), word("]")])),
                ]),
                Rule::from(simple_string),
                Rule::from(type_body),
            ]),
            zero_or_more(seq([either([op("|"), op("&")]), Rule::from(type_decl)])),
        ])
        .tag("type"),
    )?;

    let type_def = either([
        seq([kw("type"), Rule::from(type_decl), op("="), Rule::from(type_decl)]),
        seq([
            either([kw("interface"), kw("class")]),
            Rule::from(type_decl),
            optional(seq([kw("extends"), Rule::from(type_decl)])),
            Rule::from(type_body),
        ]),
    ]);

    let typed_var = either([
        seq([Rule::from(id), op(":"), Rule::from(type_decl)]),
        seq([kw("as"), Rule::from(type_decl)]),
    ]);

    let type_block = b.compile(seq([op(":"), Rule::from(type_decl)]))?;

    b.define(
        arguments,
        seq([
            op("("),
            scan(seq([
                Rule::from(id).tag("argument"),
                optional(Rule::from(type_block)),
            ]))
            .until(look_ahead(op(")"))),
            op(")"),
            optional(Rule::from(type_block)),
        ]),
    )?;

    let named_function = seq([
        kw("function"),
        optional(Rule::from(id)).tag("function"),
        Rule::from(arguments),
        Rule::from(code_block),
    ]);

    let arrow_function = seq([
        Rule::from(arguments),
        op("=>"),
        optional(Rule::from(code_block)),
    ]);

    let function = either([named_function, arrow_function]);

    let function_call = seq([Rule::from(id).tag("function-call"), look_ahead(op("("))]);

    b.define(
        object_literal,
        seq([
            op("{"),
            look_ahead(either([
                Rule::from(object_property),
                op("}"),
                Rule::from(method),
            ])),
            scan(either([
                Rule::from(object_property),
                Rule::from(method),
                Rule::from(toplevel),
            ]))
            .until(look_ahead(op("}"))),
            op("}"),
        ]),
    )?;

    let attribute_name = seq([
        Rule::from(id),
        zero_or_more(seq([word("-"), Rule::from(id)])),
    ])
    .tag("attribute");

    let attribute = seq([
        attribute_name,
        optional(either([
            seq([
                op("="),
                op("{"),
                scan(toplevel)
                    .until(look_ahead(op("}")))
                    .tag("toplevel typescript"),
                op("}"),
            ]),
            seq([op("="), Rule::from(simple_string)]),
        ])),
    ]);

    let opening_tag = seq([
        word("<"),
        Rule::from(dotted_name),
        scan(attribute).until(either([">", "/>"])),
    ])
    .tag("tag");

    let closing_tag = seq([word("</"), Rule::from(dotted_name), word(">")]).tag("tag");

    b.define(
        toplevel,
        either([
            comment,
            string,
            number,
            type_def,
            typed_var,
            function,
            opening_tag,
            closing_tag,
            Rule::from(object_literal),
            Rule::from(code_block),
            dotted_guard,
            words(KEYWORDS.iter().copied()).tag("keyword"),
            words(LITERALS.iter().copied()).tag("literal"),
            function_call,
        ]),
    )?;

    let top = b.compile(scan(toplevel))?;

    Ok(Language::new(b.build(top), PATTERNS.iter().copied())?.alias([
        "ts",
        "js",
        "tsx",
        "jsx",
        "javascript",
        "typescript",
        "react",
    ]))
}

static JAVASCRIPT: Lazy<Arc<Language>> =
    Lazy::new(|| Arc::new(language().expect("builtin javascript grammar compiles")));

/// The compiled builtin language, built once and shared.
pub fn shared() -> Arc<Language> {
    Arc::clone(&JAVASCRIPT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_compiles() {
        assert!(language().is_ok());
    }

    #[test]
    fn test_registered_aliases() {
        let language = shared();
        assert_eq!(
            language.aliases(),
            &["ts", "js", "tsx", "jsx", "javascript", "typescript", "react"]
        );
    }
}
