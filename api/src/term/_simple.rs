use super::*;
use std::fmt;
use std::sync::Arc;

/// The IRI of `xsd:string`, the datatype of simple literals.
pub const XSD_STRING: IriRef<&'static str> =
    IriRef::new_unchecked_const("http://www.w3.org/2001/XMLSchema#string");

/// The IRI of `rdf:langString`, the datatype of language-tagged strings.
pub const RDF_LANG_STRING: IriRef<&'static str> =
    IriRef::new_unchecked_const("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString");

/// An owned [`Term`], cheap to clone and thread-safe.
///
/// Any term can be copied into a [`SimpleTerm`] with [`SimpleTerm::from_term`];
/// the derived equality, hashing and ordering are consistent with [`term_eq`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SimpleTerm {
    /// An IRI
    Iri(IriRef<Arc<str>>),
    /// A blank node
    BlankNode(BnodeId<Arc<str>>),
    /// A literal with a datatype (other than `rdf:langString`)
    LiteralDatatype(Arc<str>, IriRef<Arc<str>>),
    /// A language-tagged string
    LiteralLanguage(Arc<str>, LanguageTag<Arc<str>>),
    /// A variable
    Variable(VarName<Arc<str>>),
}

impl SimpleTerm {
    /// Copy any [`Term`] into a [`SimpleTerm`].
    pub fn from_term<T: Term + ?Sized>(t: &T) -> Self {
        if let Some(iri) = t.iri() {
            return SimpleTerm::Iri(iri.map_unchecked(Arc::from));
        }
        if let Some(id) = t.bnode_id() {
            return SimpleTerm::BlankNode(id.map_unchecked(Arc::from));
        }
        if let Some(lex) = t.lexical_form() {
            return match t.language_tag() {
                Some(tag) => SimpleTerm::LiteralLanguage(lex.into(), tag.map_unchecked(Arc::from)),
                None => SimpleTerm::LiteralDatatype(
                    lex.into(),
                    t.datatype().unwrap_or(XSD_STRING).map_unchecked(Arc::from),
                ),
            };
        }
        if let Some(name) = t.variable() {
            return SimpleTerm::Variable(name.map_unchecked(Arc::from));
        }
        unreachable!("{:?} of kind {:?} exposes none of its accessors", t, t.kind())
    }

    /// Build an IRI term, checking its validity.
    pub fn iri(iri: &str) -> Result<Self, InvalidIri> {
        IriRef::new(iri).map(|i| SimpleTerm::Iri(i.map_unchecked(Arc::from)))
    }

    /// Build a blank node, checking the validity of its identifier.
    pub fn bnode(id: &str) -> Result<Self, InvalidBnodeId> {
        BnodeId::new(id).map(|b| SimpleTerm::BlankNode(b.map_unchecked(Arc::from)))
    }

    /// Build a typed literal, checking the validity of the datatype IRI.
    pub fn literal(lex: &str, datatype: &str) -> Result<Self, InvalidIri> {
        IriRef::new(datatype)
            .map(|dt| SimpleTerm::LiteralDatatype(lex.into(), dt.map_unchecked(Arc::from)))
    }

    /// Build a language-tagged string, checking the validity of the tag.
    pub fn literal_lang(lex: &str, tag: &str) -> Result<Self, InvalidLanguageTag> {
        LanguageTag::new(tag)
            .map(|tag| SimpleTerm::LiteralLanguage(lex.into(), tag.map_unchecked(Arc::from)))
    }

    /// Build a variable, checking the validity of its name.
    pub fn variable(name: &str) -> Result<Self, InvalidVarName> {
        VarName::new(name).map(|v| SimpleTerm::Variable(v.map_unchecked(Arc::from)))
    }

    /// Build an IRI term without checking its validity.
    pub fn iri_unchecked(iri: &str) -> Self {
        SimpleTerm::Iri(IriRef::new_unchecked(iri.into()))
    }

    /// Build a blank node without checking the validity of its identifier.
    pub fn bnode_unchecked(id: &str) -> Self {
        SimpleTerm::BlankNode(BnodeId::new_unchecked(id.into()))
    }

    /// Build a typed literal without checking the validity of the datatype IRI.
    pub fn literal_unchecked(lex: &str, datatype: &str) -> Self {
        SimpleTerm::LiteralDatatype(lex.into(), IriRef::new_unchecked(datatype.into()))
    }

    /// Build a language-tagged string without checking the validity of the tag.
    pub fn literal_lang_unchecked(lex: &str, tag: &str) -> Self {
        SimpleTerm::LiteralLanguage(lex.into(), LanguageTag::new_unchecked(tag.into()))
    }

    /// Build a variable without checking the validity of its name.
    pub fn variable_unchecked(name: &str) -> Self {
        SimpleTerm::Variable(VarName::new_unchecked(name.into()))
    }
}

impl Term for SimpleTerm {
    fn kind(&self) -> TermKind {
        match self {
            SimpleTerm::Iri(_) => TermKind::Iri,
            SimpleTerm::BlankNode(_) => TermKind::BlankNode,
            SimpleTerm::LiteralDatatype(..) | SimpleTerm::LiteralLanguage(..) => TermKind::Literal,
            SimpleTerm::Variable(_) => TermKind::Variable,
        }
    }
    fn iri(&self) -> Option<IriRef<&str>> {
        match self {
            SimpleTerm::Iri(iri) => Some(iri.as_ref()),
            _ => None,
        }
    }
    fn bnode_id(&self) -> Option<BnodeId<&str>> {
        match self {
            SimpleTerm::BlankNode(id) => Some(id.as_ref()),
            _ => None,
        }
    }
    fn lexical_form(&self) -> Option<&str> {
        match self {
            SimpleTerm::LiteralDatatype(lex, _) | SimpleTerm::LiteralLanguage(lex, _) => Some(lex),
            _ => None,
        }
    }
    fn datatype(&self) -> Option<IriRef<&str>> {
        match self {
            SimpleTerm::LiteralDatatype(_, dt) => Some(dt.as_ref()),
            SimpleTerm::LiteralLanguage(..) => Some(RDF_LANG_STRING),
            _ => None,
        }
    }
    fn language_tag(&self) -> Option<LanguageTag<&str>> {
        match self {
            SimpleTerm::LiteralLanguage(_, tag) => Some(tag.as_ref()),
            _ => None,
        }
    }
    fn variable(&self) -> Option<VarName<&str>> {
        match self {
            SimpleTerm::Variable(name) => Some(name.as_ref()),
            _ => None,
        }
    }
}

impl From<BnodeId<Arc<str>>> for SimpleTerm {
    fn from(value: BnodeId<Arc<str>>) -> Self {
        SimpleTerm::BlankNode(value)
    }
}

impl From<IriRef<Arc<str>>> for SimpleTerm {
    fn from(value: IriRef<Arc<str>>) -> Self {
        SimpleTerm::Iri(value)
    }
}

/// Formats the term in N-Triples syntax (variables as in SPARQL).
impl fmt::Display for SimpleTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleTerm::Iri(iri) => write!(f, "<{iri}>"),
            SimpleTerm::BlankNode(id) => write!(f, "_:{id}"),
            SimpleTerm::LiteralDatatype(lex, dt) => {
                write_quoted(f, lex)?;
                if *dt != XSD_STRING {
                    write!(f, "^^<{dt}>")?;
                }
                Ok(())
            }
            SimpleTerm::LiteralLanguage(lex, tag) => {
                write_quoted(f, lex)?;
                write!(f, "@{tag}")
            }
            SimpleTerm::Variable(name) => write!(f, "?{name}"),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, lex: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in lex.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            _ => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}
