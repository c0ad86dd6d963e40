//! Table and column identifiers for the compound store.

use sea_query::Iden;

/// Columns of `nervous_system_drugs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Iden)]
pub enum Drugs {
    #[iden = "nervous_system_drugs"]
    Table,
    #[iden = "Compound_CID"]
    CompoundCid,
    #[iden = "Name"]
    Name,
    #[iden = "drug_class"]
    DrugClass,
    #[iden = "Molecular_Formula"]
    MolecularFormula,
    #[iden = "Molecular_Weight"]
    MolecularWeight,
    #[iden = "XLogP"]
    XLogP,
    #[iden = "Polar_Area"]
    PolarArea,
    #[iden = "Rotatable_Bond_Count"]
    RotatableBondCount,
    #[iden = "Complexity"]
    Complexity,
    #[iden = "Total_Atom_Stereo_Count"]
    TotalAtomStereoCount,
    #[iden = "Charge"]
    Charge,
    #[iden = "H-Bond_Donor_Count"]
    HBondDonorCount,
    #[iden = "H-Bond_Acceptor_Count"]
    HBondAcceptorCount,
    #[iden = "Mechanism_of_Action"]
    MechanismOfAction,
    #[iden = "Main_Medical_Use"]
    MainMedicalUse,
    #[iden = "IUPAC_Name"]
    IupacName,
    #[iden = "InChIKey"]
    InChIKey,
    #[iden = "Linked_PubChem_Literature_Count"]
    LiteratureCount,
    #[iden = "Linked_PubChem_Patent_Count"]
    PatentCount,
}

/// Columns of `synonyms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Iden)]
pub enum Synonyms {
    #[iden = "synonyms"]
    Table,
    #[iden = "inchikey"]
    InChIKey,
    #[iden = "synonym"]
    Synonym,
    #[iden = "source"]
    Source,
}

impl Drugs {
    /// Store column name, as it appears as a key in fetched rows.
    pub fn name(self) -> String {
        self.to_string()
    }
}

/// Columns shown on the listing page.
pub const LISTING_COLUMNS: [Drugs; 11] = [
    Drugs::Name,
    Drugs::CompoundCid,
    Drugs::MolecularFormula,
    Drugs::MolecularWeight,
    Drugs::XLogP,
    Drugs::PolarArea,
    Drugs::MechanismOfAction,
    Drugs::MainMedicalUse,
    Drugs::LiteratureCount,
    Drugs::PatentCount,
    Drugs::DrugClass,
];

/// Text columns matched by free-text search, OR-ed together.
pub const SEARCH_COLUMNS: [Drugs; 5] = [
    Drugs::Name,
    Drugs::MolecularFormula,
    Drugs::MechanismOfAction,
    Drugs::MainMedicalUse,
    Drugs::DrugClass,
];

/// Columns of the home page descriptor table.
pub const DESCRIPTOR_COLUMNS: [Drugs; 11] = [
    Drugs::Name,
    Drugs::DrugClass,
    Drugs::MolecularWeight,
    Drugs::XLogP,
    Drugs::PolarArea,
    Drugs::RotatableBondCount,
    Drugs::Complexity,
    Drugs::TotalAtomStereoCount,
    Drugs::Charge,
    Drugs::HBondDonorCount,
    Drugs::HBondAcceptorCount,
];

/// Columns of the detail page.
pub const DETAIL_COLUMNS: [Drugs; 13] = [
    Drugs::Name,
    Drugs::CompoundCid,
    Drugs::MolecularFormula,
    Drugs::MolecularWeight,
    Drugs::XLogP,
    Drugs::PolarArea,
    Drugs::MechanismOfAction,
    Drugs::MainMedicalUse,
    Drugs::IupacName,
    Drugs::InChIKey,
    Drugs::DrugClass,
    Drugs::HBondDonorCount,
    Drugs::HBondAcceptorCount,
];
