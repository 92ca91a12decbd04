//! Rule tables for every boolean symptom, treatment and organ-support feature.
//!
//! Fever and ICU admission need extra logic and live in their own modules.

use std::sync::LazyLock;

use covid_match::{Cascade, Feature, PatternRule, PatternRuleBuilder};

use crate::patterns::{compile, negated, rule, words};

/// Compiled feature tables, built once per process.
pub static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

#[derive(Debug)]
pub struct Catalog {
    pub dyspnea: Feature,
    pub cough: Feature,
    pub intubated: Feature,
    pub ventilated: Feature,
    pub ards: Feature,
    pub ecmo: Feature,
    pub septic_shock: Feature,
    pub organ_dysfunction: Feature,
    pub remdesivir: Feature,
    pub plasma: Feature,
    pub plaquenil: Feature,
    pub azithromycin: Feature,
    pub other_drugs: Feature,
    pub dexamethasone: Feature,
    pub chills: Feature,
    pub rigors: Feature,
    pub myalgia: Feature,
    pub runny_nose: Feature,
    pub sore_throat: Feature,
    pub taste: Feature,
    pub smell: Feature,
    pub fatigue: Feature,
    pub wheezing: Feature,
    pub chest_pain: Feature,
    pub nausea: Feature,
    pub vomiting: Feature,
    pub headache: Feature,
    pub abdominal_pain: Feature,
    pub diarrhea: Feature,
    pub asymptomatic: Feature,
}

/// Signal pattern plus its negated form, both capturing `signal`.
fn simple(signal: &'static str, neg: &'static str, pattern: &str, neg_words: usize) -> Feature {
    Feature::new(
        signal,
        Some(neg),
        Cascade::new(
            signal,
            vec![rule(signal, pattern), compile(negated(neg, neg_words, pattern))],
        ),
    )
}

const DYSPNEA: &str = r"\b(?P<dyspnea>(dyspnea|short(ness)? of breath|labored breathing|sob|increased work of breathing|breathing (difficulty?|trouble)|(difficulty?|trouble) breathing|(difficulty|trouble) (catching( a)?|taking( a)?)( full)? breath|respiration labored|labored respiration|hung(er|ry for) air|gasping|breathlessness|out of breath|breath shortness|air hunger|resp\.?(iratory)? distress))\b";

const COUGH: &str = r"\b(?P<cough>(cough(ed|ing)?))\b";

const INTUBATED: &str = r"\b(?P<intubated>(re-?)?(intubat(ed?|ion)|intub\.?))\b";

const VENT: &str = r"\b(?P<vent>(vent\.?(ilator|ilation)?))\b";

const ARDS: &str = r"\b(?P<ards>(acute respiratory distress syndrome|(severe )?ards|acute (hypoxemic|hypoxic) respiratory failure|(acute )?respiratory failure|acute respiratory disease))";

const ECMO: &str = r"\b(?P<ecmo>(extra[- ]?corporeal membrane oxygenation|ecmo))\b";

const SEPTIC_SHOCK: &str = r"\b(?P<septic_shock>(refractory septic|refractory|septic) shock)\b";

const MOD: &str = r"\b(?P<mod>(multiple|multi[- ]?|acute)\s?organ (dysfunction|failure|fail))";

const DRUG_HEADER: &str = r"\b(received|(began|started)( on| treatment with)?|units?( of)?|given)\b";

const REMDESIVIR: &str = r"\b(?P<remdesivir>(remdesivir|veklury))\b";

const PLASMA: &str = r"\b(?P<plasma>((con[a-z]+?ent|conv\.?) plasm[ea]|plasm[ea])\s?(transfusion|therapy)?)\b";

/// Includes misspellings seen in chart text.
const PLAQUENIL: &str = r"\b(?P<plaquenil>(hydroxychloroquine|hydroxychl|plaquenil|plaqurnil|palquenil))";

const AZITHROMYCIN: &str = r"\b(?P<azithromycin>(azithromycin|a?zithro|zpack|zpak))";

const OTHER_DRUGS: &str = r"\b(?P<other_drugs>(humira|adalimumab|kaletra|lopinavir|ritonavir|regeneron|monoclonal antibod(y|ies)|monoclonals|tocilizumab|actemra|casirivimab|sotrovimab|bamlanivimab|etesevimab|imdevimab|sarilumab|baricitinib|olumiant|veklury|tofacitinib))";

const DEXAMETHASONE: &str = r"\b(?P<dexamethasone>(dexamethasone|decadron|baycadron|dexpak|zemapak|zodex))";

const CHILLS: &str = r"\b(?P<chills>(chill(s|ed)?|(felt|feeling) cold))\b";

const RIGORS: &str = r"\b(?P<rigors>(rigor(s|ed|ing)?|shiver(s|ed|ing)?|shak(es|ing)?))\b";

const MYALGIA: &str = r"\b(?P<myalgia>(myalgias?|myodynias?|muscles? (aching|cramping|soreness|pains?|cramps?|ache(s|d)?)|(aching|sore|(pain|cramp)s? in( the)?) muscles?))\b";

const RUNNY_NOSE: &str = r"\b(?P<runny_nose>((runny|running|dripping) nose|nasal drip|rhinorrhea))\b";

const SORE_THROAT: &str = r"\b(?P<sore_throat>(sore throat|pharyngitis|throat (pain|soreness|hurts)))\b";

const TASTE_AND_SMELL: &str = r"\b(taste and smell|smell and taste|taste/smell|smell/taste|anosmia and (ageusia|aguesia)|(ageusia|aguesia) and anosmia|sense of taste and smell|sense of smell and taste)\b";

const PROBLEMS_WITH: &str = r"\b(problems? with|problems?|decreased sense of|decreased|lost sense of|loss of|lost)\b";

const FATIGUE_TERMS: &str = r"\b(fatigued?|lethargy/malaise|malaise/lethargy|letharg(ic|y)|exhaust(ion|ed)|wear(iness|y)|tired(ness)?|enervat(ion|ed)|lack of energy|no energy)\b";

const WHEEZING: &str = r"\b(?P<wheezing>(wheezing|wheezed?))\b";

const CHEST_PAIN: &str = r"\b(?P<chest_pain>(chest pains?|pains? in (the )?chest|angina))\b";

const NAUSEA_AND_VOMITING: &str = r"\b(nausea and vomiting|vomiting and nausea|nausea/vomiting|vomiting/nausea|n/v|nv)\b";

const HEADACHE: &str = r"\b(?P<headache>(headaches?|cephalalgia|h/a|ha))\b";

const ABDOMINAL: &str = r"\b(abdominal|abd\.?|flank|(mid)?epigastric|pelvic|liver)\b";

const DIARRHEA: &str = r"\b(?P<diarrhea>(diarrhea|(loose|watery) (stool|bowel)s?))\b";

impl Catalog {
    fn build() -> Self {
        let w = words(3);

        let vent_rule = |name: &str, prefix: &str| {
            compile(
                PatternRule::builder(name, format!("{prefix}{VENT}"))
                    .not_preceded_by("vent", "husband on "),
            )
        };
        let ventilated = Feature::new(
            "vent",
            Some("neg_vent"),
            Cascade::new(
                "vent",
                vec![
                    vent_rule("vent_mechanical", format!(r"\b(mechanical|mech\.?){w}").as_str()),
                    vent_rule("vent_on", format!(r"\b((patient|pt|mother) )?on{w}").as_str()),
                    vent_rule("vent", ""),
                    compile(
                        negated("neg_vent", 3, VENT).not_preceded_by("vent", "husband on "),
                    ),
                ],
            ),
        );

        let cough_rule = |builder: PatternRuleBuilder| {
            compile(builder.not_followed_by("cough", " medicine"))
        };
        let cough = Feature::new(
            "cough",
            Some("neg_cough"),
            Cascade::new(
                "cough",
                vec![
                    cough_rule(PatternRule::builder("cough", COUGH)),
                    cough_rule(negated("neg_cough", 5, COUGH)),
                ],
            ),
        );

        let septic_shock = Feature::new(
            "septic_shock",
            Some("neg_septic_shock"),
            Cascade::new(
                "septic_shock",
                vec![
                    rule(
                        "septic_shock_diagnosed",
                        format!(r"\b(with|has|diagnosis of){w}{SEPTIC_SHOCK}"),
                    ),
                    rule("septic_shock", SEPTIC_SHOCK),
                    compile(negated("neg_septic_shock", 3, SEPTIC_SHOCK)),
                ],
            ),
        );

        let drug = |signal: &'static str, neg: &'static str, pattern: &str, suffix: &str| {
            Feature::new(
                signal,
                Some(neg),
                Cascade::new(
                    signal,
                    vec![
                        rule(signal, pattern),
                        rule(
                            &format!("{signal}_given"),
                            format!("({DRUG_HEADER}{w})?{pattern}{suffix}"),
                        ),
                        compile(negated(neg, 3, pattern)),
                    ],
                ),
            )
        };
        let plaquenil_dose = format!(r"({w}(2|4|6|8)00\s?mg)?");

        let sense = |signal: &'static str, neg: &'static str, terms: &str, neg_tail: &str| {
            let pattern = format!("({PROBLEMS_WITH}{w})?(?P<{signal}>({TASTE_AND_SMELL}|{terms}))");
            Feature::new(
                signal,
                Some(neg),
                Cascade::new(
                    signal,
                    vec![rule(signal, pattern), compile(negated(neg, 3, neg_tail))],
                ),
            )
        };

        let fatigue = Feature::new(
            "fatigue",
            Some("neg_fatigue"),
            Cascade::new(
                "fatigue",
                vec![
                    rule(
                        "fatigue",
                        format!(
                            r"\b((feels?|feeling|has|had|having|experienced|experiencing){w})?(?P<fatigue>{FATIGUE_TERMS})"
                        ),
                    ),
                    compile(negated("neg_fatigue", 5, FATIGUE_TERMS)),
                ],
            ),
        );

        let nausea = format!(r"(?P<nausea>({NAUSEA_AND_VOMITING}|\b(nauseous|nausea(ted)?)))");
        let vomiting =
            format!(r"(?P<vomiting>({NAUSEA_AND_VOMITING}|\b(vomiting|vomit(ed)?|(hemat|hyper)?eme(sis|tic))))");
        let abdominal_pain = format!(r"(?P<abdominal_pain>({ABDOMINAL}{w}\bpains?\b))");

        let asymptomatic = Feature::new(
            "asymptomatic",
            None,
            Cascade::new(
                "asymptomatic",
                vec![compile(
                    PatternRule::builder("asymptomatic", r"\b(?P<asymptomatic>asymptomatic)")
                        .not_followed_by("asymptomatic", " bacteriuria"),
                )],
            ),
        );

        Self {
            dyspnea: simple("dyspnea", "neg_dysp", DYSPNEA, 5),
            cough,
            intubated: simple("intubated", "neg_intubated", INTUBATED, 5),
            ventilated,
            ards: simple("ards", "neg_ards", ARDS, 3),
            ecmo: simple("ecmo", "neg_ecmo", ECMO, 3),
            septic_shock,
            organ_dysfunction: simple("mod", "neg_mod", MOD, 3),
            remdesivir: drug("remdesivir", "neg_remdesivir", REMDESIVIR, ""),
            plasma: drug("plasma", "neg_plasma", PLASMA, ""),
            plaquenil: drug("plaquenil", "neg_plaquenil", PLAQUENIL, plaquenil_dose.as_str()),
            azithromycin: simple("azithromycin", "neg_azithromycin", AZITHROMYCIN, 3),
            other_drugs: simple("other_drugs", "neg_other_drugs", OTHER_DRUGS, 3),
            dexamethasone: simple("dexamethasone", "neg_dexamethasone", DEXAMETHASONE, 3),
            chills: simple("chills", "neg_chills", CHILLS, 6),
            rigors: simple("rigors", "neg_rigors", RIGORS, 6),
            myalgia: simple("myalgia", "neg_myalgia", MYALGIA, 6),
            runny_nose: simple("runny_nose", "neg_runny_nose", RUNNY_NOSE, 5),
            sore_throat: simple("sore_throat", "neg_sore_throat", SORE_THROAT, 5),
            taste: sense("taste", "neg_taste", r"\b(taste|ageusia|aguesia|tasting)\b", "(ageusia|aguesia)"),
            smell: sense("smell", "neg_smell", r"\b(smell|anosmia|smelling)\b", "anosmia"),
            fatigue,
            wheezing: simple("wheezing", "neg_wheezing", WHEEZING, 3),
            chest_pain: simple("chest_pain", "neg_chest_pain", CHEST_PAIN, 3),
            nausea: simple("nausea", "neg_nausea", &nausea, 3),
            vomiting: simple("vomiting", "neg_vomiting", &vomiting, 3),
            headache: simple("headache", "neg_headache", HEADACHE, 3),
            abdominal_pain: simple("abdominal_pain", "neg_abdominal_pain", &abdominal_pain, 5),
            diarrhea: simple("diarrhea", "neg_diarrhea", DIARRHEA, 5),
            asymptomatic,
        }
    }

    /// Every feature, for diagnostics.
    pub fn features(&self) -> [&Feature; 30] {
        [
            &self.dyspnea,
            &self.cough,
            &self.intubated,
            &self.ventilated,
            &self.ards,
            &self.ecmo,
            &self.septic_shock,
            &self.organ_dysfunction,
            &self.remdesivir,
            &self.plasma,
            &self.plaquenil,
            &self.azithromycin,
            &self.other_drugs,
            &self.dexamethasone,
            &self.chills,
            &self.rigors,
            &self.myalgia,
            &self.runny_nose,
            &self.sore_throat,
            &self.taste,
            &self.smell,
            &self.fatigue,
            &self.wheezing,
            &self.chest_pain,
            &self.nausea,
            &self.vomiting,
            &self.headache,
            &self.abdominal_pain,
            &self.diarrhea,
            &self.asymptomatic,
        ]
    }
}

#[cfg(test)]
mod tests {
    use covid_match::MatchOptions;

    use super::*;

    fn detect(feature: &Feature, sentence: &str) -> bool {
        feature.detect(sentence, &MatchOptions::default())
    }

    #[test]
    fn catalog_compiles() {
        assert_eq!(CATALOG.features().len(), 30);
    }

    /// A phrase each negatable feature detects on its own.
    const PHRASES: [(&str, &str); 29] = [
        ("dyspnea", "shortness of breath"),
        ("cough", "cough"),
        ("intubated", "intubation"),
        ("vent", "ventilator"),
        ("ards", "ards"),
        ("ecmo", "ecmo"),
        ("septic_shock", "septic shock"),
        ("mod", "multiple organ failure"),
        ("remdesivir", "remdesivir"),
        ("plasma", "convalescent plasma"),
        ("plaquenil", "hydroxychloroquine"),
        ("azithromycin", "azithromycin"),
        ("other_drugs", "tocilizumab"),
        ("dexamethasone", "dexamethasone"),
        ("chills", "chills"),
        ("rigors", "rigors"),
        ("myalgia", "myalgias"),
        ("runny_nose", "runny nose"),
        ("sore_throat", "sore throat"),
        ("taste", "ageusia"),
        ("smell", "anosmia"),
        ("fatigue", "fatigue"),
        ("wheezing", "wheezing"),
        ("chest_pain", "chest pain"),
        ("nausea", "nausea"),
        ("vomiting", "vomiting"),
        ("headache", "headache"),
        ("abdominal_pain", "abdominal pain"),
        ("diarrhea", "diarrhea"),
    ];

    #[test]
    fn each_negation_cue_flips_presence() {
        let mut checked = 0;
        for feature in CATALOG.features() {
            if feature.negation_group().is_none() {
                continue;
            }
            let phrase = PHRASES
                .iter()
                .find(|(name, _)| *name == feature.name())
                .map(|(_, phrase)| *phrase)
                .unwrap_or_else(|| panic!("no phrase for {}", feature.name()));
            let plain = format!("patient reports {phrase}");
            assert!(detect(feature, &plain), "{plain}");
            for cue in ["denies", "no", "without"] {
                let negated = format!("patient {cue} {phrase}");
                assert!(!detect(feature, &negated), "{negated}");
            }
            checked += 1;
        }
        assert_eq!(checked, PHRASES.len());
    }

    #[test]
    fn cue_inside_the_word_gap_negates() {
        assert!(!detect(&CATALOG.fatigue, "had no fatigue"));
        assert!(!detect(&CATALOG.septic_shock, "with no septic shock"));
        assert!(detect(&CATALOG.septic_shock, "with refractory septic shock"));
    }

    #[test]
    fn cough_medicine_is_not_a_cough() {
        assert!(!detect(&CATALOG.cough, "took cough medicine"));
    }

    #[test]
    fn ventilator_rules() {
        assert!(detect(&CATALOG.ventilated, "placed on mechanical ventilation"));
        assert!(!detect(&CATALOG.ventilated, "husband on ventilator"));
        assert!(!detect(&CATALOG.ventilated, "not on vent"));
    }

    #[test]
    fn drugs() {
        assert!(detect(&CATALOG.plaquenil, "started on hydroxychloroquine 400 mg"));
        assert!(detect(&CATALOG.plasma, "received convalescent plasma"));
        assert!(detect(&CATALOG.other_drugs, "given tocilizumab"));
        assert!(detect(&CATALOG.dexamethasone, "on decadron"));
        assert!(!detect(&CATALOG.azithromycin, "declined azithromycin"));
    }

    #[test]
    fn taste_and_smell() {
        assert!(detect(&CATALOG.taste, "loss of taste and smell"));
        assert!(detect(&CATALOG.smell, "loss of taste and smell"));
        assert!(!detect(&CATALOG.smell, "no anosmia"));
    }

    #[test]
    fn nausea_vomiting_shorthand() {
        assert!(detect(&CATALOG.nausea, "n/v since yesterday"));
        assert!(detect(&CATALOG.vomiting, "n/v since yesterday"));
    }

    #[test]
    fn asymptomatic_ignores_negation() {
        assert!(detect(&CATALOG.asymptomatic, "asymptomatic at admission"));
        assert!(detect(&CATALOG.asymptomatic, "not asymptomatic"));
        assert!(!detect(&CATALOG.asymptomatic, "asymptomatic bacteriuria"));
    }
}
