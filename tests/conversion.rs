//! End-to-end conversion tests.
//!
//! Build small documents through the standoff ingest and check the emitted
//! rows column by column.

use standoff_tsv::{convert_document, read_document_str, ConvertConfig, TsvLine};

fn rows(lines: &[TsvLine]) -> Vec<&[String; 10]> {
    lines
        .iter()
        .filter_map(|l| match l {
            TsvLine::Row(fields) => Some(fields),
            TsvLine::Comment(_) => None,
        })
        .collect()
}

fn comments(lines: &[TsvLine]) -> Vec<&str> {
    lines
        .iter()
        .filter_map(|l| match l {
            TsvLine::Comment(text) => Some(text.as_str()),
            TsvLine::Row(_) => None,
        })
        .collect()
}

#[test]
fn test_two_token_entity_labels() {
    let json = r#"{
        "id": "d_0001",
        "language": "en",
        "text": "New York is great",
        "sentences": [
            { "id": 1, "begin": 0, "end": 17, "tokens": [
                { "id": 10, "begin": 0, "end": 3 },
                { "id": 11, "begin": 4, "end": 8 },
                { "id": 12, "begin": 9, "end": 11 },
                { "id": 13, "begin": 12, "end": 17 }
            ] }
        ],
        "entities": [
            { "id": 20, "begin": 0, "end": 8, "value": "pers.ind",
              "wikidata_id": "https://www.wikidata.org/wiki/Q60" }
        ]
    }"#;
    let doc = read_document_str(json, "d.json").unwrap();
    let table = convert_document(&doc, &ConvertConfig::default(), &Default::default());
    let rows = rows(&table.rows);

    assert_eq!(rows.len(), 4);

    // "New" begins the entity.
    assert_eq!(rows[0][0], "New");
    assert_eq!(rows[0][1], "B-pers");
    assert_eq!(rows[0][3], "B-pers.ind");
    assert_eq!(rows[0][6], "O"); // no nested entity
    assert_eq!(rows[0][7], "Q60");
    assert_eq!(rows[0][9], "LED0.00");

    // "York" continues it, followed by a space.
    assert_eq!(rows[1][0], "York");
    assert_eq!(rows[1][1], "I-pers");
    assert_eq!(rows[1][3], "I-pers.ind");
    assert_eq!(rows[1][7], "Q60");
    assert!(!rows[1][9].contains("NoSpaceAfter"));

    // Unannotated tokens.
    assert_eq!(rows[2][0], "is");
    assert_eq!(rows[2][1], "O");
    assert_eq!(rows[2][7], "_");
    assert_eq!(rows[2][9], "_");

    // Last token of the segment; nothing follows it in the text.
    assert_eq!(rows[3][0], "great");
    assert_eq!(rows[3][9], "EndOfSentence|NoSpaceAfter");
}

#[test]
fn test_hyphenated_word_collapses_to_one_row() {
    let json = r#"{
        "id": "d_0001",
        "text": "Finanz- Budger ist",
        "sentences": [
            { "id": 1, "begin": 0, "end": 18, "tokens": [
                { "id": 10, "begin": 0, "end": 7 },
                { "id": 11, "begin": 8, "end": 14 },
                { "id": 12, "begin": 15, "end": 18 }
            ] }
        ],
        "hyphenations": [ { "begin": 0, "end": 14 } ]
    }"#;
    let doc = read_document_str(json, "d.json").unwrap();
    assert_eq!(doc.hyphenated_words[0].surface, "Finanz-Budger");

    let table = convert_document(&doc, &ConvertConfig::default(), &Default::default());
    let rows = rows(&table.rows);

    // Both fragments collapse into one merged row at the first fragment's
    // position; the continuation token is suppressed.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "FinanzBudger");
    assert_eq!(rows[1][0], "ist");
}

#[test]
fn test_single_char_fragment_is_not_dehyphenated() {
    let json = r#"{
        "id": "d_0001",
        "text": "a b",
        "sentences": [
            { "id": 1, "begin": 0, "end": 3, "tokens": [
                { "id": 10, "begin": 0, "end": 1 },
                { "id": 11, "begin": 2, "end": 3 }
            ] }
        ],
        "hyphenations": [ { "begin": 0, "end": 3 } ]
    }"#;
    let doc = read_document_str(json, "d.json").unwrap();
    let table = convert_document(&doc, &ConvertConfig::default(), &Default::default());
    let rows = rows(&table.rows);

    // The one-character first fragment keeps its raw surface and does not
    // open a suppression window, so the continuation is emitted too.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "a");
    assert_eq!(rows[1][0], "b");
}

#[test]
fn test_noisy_mention_led_flag() {
    let json = r#"{
        "id": "d_0001",
        "text": "Parls ist schon",
        "sentences": [
            { "id": 1, "begin": 0, "end": 15, "tokens": [
                { "id": 10, "begin": 0, "end": 5 },
                { "id": 11, "begin": 6, "end": 9 },
                { "id": 12, "begin": 10, "end": 15 }
            ] }
        ],
        "entities": [
            { "id": 20, "begin": 0, "end": 5, "value": "loc.adm",
              "noisy_ocr": true, "transcript": "Pari",
              "wikidata_id": "https://www.wikidata.org/wiki/Q90" }
        ]
    }"#;
    let doc = read_document_str(json, "d.json").unwrap();
    assert!((doc.mentions[0].levenshtein_norm - 0.4).abs() < 1e-9);

    let table = convert_document(&doc, &ConvertConfig::default(), &Default::default());
    let rows = rows(&table.rows);

    // Two decimals; the LED flag sorts after everything else, and here it
    // is the only flag (a space follows the token).
    assert_eq!(rows[0][9], "LED0.40");
}

#[test]
fn test_biblio_mention_splits_layers() {
    let json = r#"{
        "id": "d_0001",
        "text": "Jebb ad loc.",
        "sentences": [
            { "id": 1, "begin": 0, "end": 12, "tokens": [
                { "id": 10, "begin": 0, "end": 4 },
                { "id": 11, "begin": 5, "end": 7 },
                { "id": 12, "begin": 8, "end": 12 }
            ] }
        ],
        "entities": [
            { "id": 20, "begin": 0, "end": 12, "value": "secondary-full",
              "wikidata_id": "https://www.wikidata.org/wiki/Q12345" }
        ]
    }"#;
    let doc = read_document_str(json, "d.json").unwrap();
    let table = convert_document(&doc, &ConvertConfig::default(), &Default::default());

    let main = rows(&table.rows);
    let biblio = rows(&table.biblio_rows);
    assert_eq!(main.len(), biblio.len());

    // Main layer: no literal annotation, and no link despite the mention
    // being linked, because secondary references are non-linkable.
    assert_eq!(main[0][1], "O");
    assert_eq!(main[0][7], "_");
    assert!(main[0][9].contains("InSecondaryReference"));

    // Bibliographic layer carries the reference span.
    assert_eq!(biblio[0][1], "B-secondary-full");
    assert_eq!(biblio[1][1], "I-secondary-full");
    assert_eq!(biblio[2][1], "I-secondary-full");
    for row in &biblio {
        assert_eq!(row[3], "_");
        assert_eq!(row[7], "_");
    }
}

#[test]
fn test_corrupted_segment_excluded() {
    let json = r#"{
        "id": "d_0001",
        "text": "garbled junk fine text",
        "sentences": [
            { "id": 1, "begin": 0, "end": 12, "corrupted": true, "tokens": [
                { "id": 10, "begin": 0, "end": 7 },
                { "id": 11, "begin": 8, "end": 12 }
            ] },
            { "id": 2, "begin": 13, "end": 22, "tokens": [
                { "id": 12, "begin": 13, "end": 17 },
                { "id": 13, "begin": 18, "end": 22 }
            ] }
        ]
    }"#;
    let doc = read_document_str(json, "d.json").unwrap();
    let table = convert_document(&doc, &ConvertConfig::default(), &Default::default());
    let rows = rows(&table.rows);

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r[0] != "garbled" && r[0] != "junk"));
}

#[test]
fn test_nested_entity_column() {
    let json = r#"{
        "id": "d_0001",
        "text": "Universite de Paris",
        "sentences": [
            { "id": 1, "begin": 0, "end": 19, "tokens": [
                { "id": 10, "begin": 0, "end": 10 },
                { "id": 11, "begin": 11, "end": 13 },
                { "id": 12, "begin": 14, "end": 19 }
            ] }
        ],
        "entities": [
            { "id": 20, "begin": 0, "end": 19, "value": "org.ent",
              "wikidata_id": "https://www.wikidata.org/wiki/Q209842" },
            { "id": 21, "begin": 14, "end": 19, "value": "loc.adm",
              "wikidata_id": "https://www.wikidata.org/wiki/Q90" }
        ]
    }"#;
    let doc = read_document_str(json, "d.json").unwrap();

    let table = convert_document(&doc, &ConvertConfig::default(), &Default::default());
    let r = rows(&table.rows);
    // Outer entity wins the main columns; the nested one fills NE-NESTED on
    // the token where both spans apply.
    assert_eq!(r[0][3], "B-org.ent");
    assert_eq!(r[0][6], "O");
    assert_eq!(r[2][3], "I-org.ent");
    assert_eq!(r[2][6], "B-loc.adm");
    assert_eq!(r[2][7], "Q209842");

    // drop_nested blanks the column.
    let config = ConvertConfig {
        drop_nested: true,
        ..ConvertConfig::default()
    };
    let table = convert_document(&doc, &config, &Default::default());
    let r = rows(&table.rows);
    assert_eq!(r[2][6], "_");
}

#[test]
fn test_non_linkable_entity_type() {
    let json = r#"{
        "id": "d_0001",
        "text": "v. 124",
        "sentences": [
            { "id": 1, "begin": 0, "end": 6, "tokens": [
                { "id": 10, "begin": 0, "end": 2 },
                { "id": 11, "begin": 3, "end": 6 }
            ] }
        ],
        "entities": [
            { "id": 20, "begin": 0, "end": 6, "value": "scope",
              "wikidata_id": "https://www.wikidata.org/wiki/Q1" }
        ]
    }"#;
    let doc = read_document_str(json, "d.json").unwrap();
    let table = convert_document(&doc, &ConvertConfig::default(), &Default::default());
    let r = rows(&table.rows);
    assert_eq!(r[0][1], "B-scope");
    assert_eq!(r[0][7], "_");
    assert_eq!(r[1][7], "_");
}

#[test]
fn test_layers_stay_synchronized() {
    let json = r#"{
        "id": "d_0001",
        "text": "Jebb on Aias v. 1",
        "sentences": [
            { "id": 1, "begin": 0, "end": 17, "tokens": [
                { "id": 10, "begin": 0, "end": 4 },
                { "id": 11, "begin": 5, "end": 7 },
                { "id": 12, "begin": 8, "end": 12 },
                { "id": 13, "begin": 13, "end": 15 },
                { "id": 14, "begin": 16, "end": 17 }
            ] }
        ],
        "entities": [
            { "id": 20, "begin": 0, "end": 4, "value": "secondary-meta" },
            { "id": 21, "begin": 8, "end": 12, "value": "pers.myth",
              "wikidata_id": "https://www.wikidata.org/wiki/Q172725" }
        ]
    }"#;
    let doc = read_document_str(json, "d.json").unwrap();
    let table = convert_document(&doc, &ConvertConfig::default(), &Default::default());

    let main = rows(&table.rows);
    let biblio = rows(&table.biblio_rows);
    assert_eq!(main.len(), biblio.len());
    for (m, b) in main.iter().zip(&biblio) {
        // Token and MISC columns are identical across layers.
        assert_eq!(m[0], b[0]);
        assert_eq!(m[9], b[9]);
    }
}

#[test]
fn test_metadata_comment_lines() {
    let json = r#"{
        "id": "Wecklein1894_0087",
        "language": "de",
        "text": "Aias",
        "sentences": [
            { "id": 1, "begin": 0, "end": 4, "tokens": [
                { "id": 10, "begin": 0, "end": 4 }
            ] }
        ]
    }"#;
    let doc = read_document_str(json, "corpus/de/Wecklein1894_0087.json").unwrap();
    let table = convert_document(
        &doc,
        &ConvertConfig::default(),
        &standoff_tsv::DEFAULT_METADATA,
    );

    let comments = comments(&table.rows);
    assert!(comments.contains(&"# hipe2022:document_id = Wecklein1894_0087"));
    assert!(comments.contains(&"# hipe2022:language = de"));
    assert!(comments.contains(&"# ajmc:page = 87"));
    assert!(comments.contains(&"# ajmc:author = Wecklein, Nikolaus"));

    // Comment lines precede all token rows and match on both layers.
    assert!(matches!(table.rows[0], TsvLine::Comment(_)));
    let biblio_comments = self::comments(&table.biblio_rows);
    assert_eq!(comments, biblio_comments);
}
