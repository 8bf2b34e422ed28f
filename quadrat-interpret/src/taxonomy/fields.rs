use super::name::{build_scientific_name, clean_name};
use quadrat_core::{MatchQuery, Rank, Term, TermLookup};

/// The verbatim inputs to a name match, taken from core fields or one
/// identification row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxonFields {
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub scientific_name: Option<String>,
    pub authorship: Option<String>,
    pub generic_name: Option<String>,
    pub specific_epithet: Option<String>,
    pub infraspecific_epithet: Option<String>,
    pub rank: Option<Rank>,
}

impl TaxonFields {
    pub fn from_terms<L: TermLookup + ?Sized>(terms: &L) -> Self {
        let text = |term| terms.value(term).map(str::to_string);
        Self {
            kingdom: text(Term::Kingdom),
            phylum: text(Term::Phylum),
            class: text(Term::Class),
            order: text(Term::Order),
            family: text(Term::Family),
            genus: text(Term::Genus),
            scientific_name: text(Term::ScientificName),
            authorship: text(Term::ScientificNameAuthorship),
            generic_name: text(Term::GenericName),
            specific_epithet: text(Term::SpecificEpithet),
            infraspecific_epithet: text(Term::InfraspecificEpithet),
            rank: interpret_rank(terms),
        }
    }

    /// The query sent to the reference taxonomy
    pub fn query(&self) -> MatchQuery {
        let genus = clean_name(self.genus.as_deref());
        let generic_name = clean_name(self.generic_name.as_deref());
        MatchQuery {
            kingdom: clean_name(self.kingdom.as_deref()),
            phylum: clean_name(self.phylum.as_deref()),
            class: clean_name(self.class.as_deref()),
            order: clean_name(self.order.as_deref()),
            family: clean_name(self.family.as_deref()),
            name: build_scientific_name(
                self.scientific_name.as_deref(),
                generic_name.as_deref(),
                genus.as_deref(),
                self.specific_epithet.as_deref(),
                self.infraspecific_epithet.as_deref(),
            ),
            genus,
            rank: self.rank,
        }
    }
}

/// Stated rank, then verbatim rank, then whatever the atomized fields imply
pub fn interpret_rank<L: TermLookup + ?Sized>(terms: &L) -> Option<Rank> {
    let parsed = |term| terms.value(term).and_then(|v| Rank::parse(v).into_payload());
    parsed(Term::TaxonRank)
        .or_else(|| parsed(Term::VerbatimTaxonRank))
        .or_else(|| {
            if !terms.has(Term::Genus) {
                None
            } else if !terms.has(Term::SpecificEpithet) {
                Some(Rank::Genus)
            } else if terms.has(Term::InfraspecificEpithet) {
                Some(Rank::InfraspecificName)
            } else {
                Some(Rank::Species)
            }
        })
}
