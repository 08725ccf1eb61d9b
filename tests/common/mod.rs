//! Fixture builders shared by the integration tests
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub const GROEL_DEF: &str =
    "sp|P0A6F5|CH60_ECOLI Chaperonin GroEL OS=Escherichia coli OX=83333 GN=groL PE=1 SV=2";
pub const TRP_DEF: &str =
    "sp|P00900|TRPE_SERMA R00986~~~4.1.3.27~~~Anthranilate synthase component 1 OS=Serratia marcescens OX=615 GN=trpE PE=1 SV=1";

pub fn hsp_xml(bit_score: f64, evalue: f64, identity: u64, gaps: u64, align_len: u64) -> String {
    format!(
        "<Hsp>\
         <Hsp_num>1</Hsp_num>\
         <Hsp_bit-score>{}</Hsp_bit-score>\
         <Hsp_evalue>{:e}</Hsp_evalue>\
         <Hsp_identity>{}</Hsp_identity>\
         <Hsp_gaps>{}</Hsp_gaps>\
         <Hsp_align-len>{}</Hsp_align-len>\
         </Hsp>",
        bit_score, evalue, identity, gaps, align_len
    )
}

pub fn hit_xml(ordinal: usize, def: &str, hsps: &[String]) -> String {
    format!(
        "<Hit>\
         <Hit_num>{n}</Hit_num>\
         <Hit_id>gnl|BL_ORD_ID|{n}</Hit_id>\
         <Hit_def>{def}</Hit_def>\
         <Hit_hsps>{hsps}</Hit_hsps>\
         </Hit>",
        n = ordinal,
        def = def,
        hsps = hsps.concat()
    )
}

pub fn iteration_xml(query_def: &str, query_len: u64, hits: &[String]) -> String {
    format!(
        "<Iteration>\
         <Iteration_query-def>{}</Iteration_query-def>\
         <Iteration_query-len>{}</Iteration_query-len>\
         <Iteration_hits>{}</Iteration_hits>\
         </Iteration>",
        query_def,
        query_len,
        hits.concat()
    )
}

pub fn blast_output_xml(iterations: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n\
         <BlastOutput>\
         <BlastOutput_program>blastp</BlastOutput_program>\
         <BlastOutput_iterations>{}</BlastOutput_iterations>\
         </BlastOutput>\n",
        iterations.concat()
    )
}

/// One query, `contig_1_1`, with one single-HSP hit per description
pub fn single_query_xml(defs: &[&str]) -> String {
    let hits: Vec<String> = defs
        .iter()
        .enumerate()
        .map(|(i, def)| hit_xml(i + 1, def, &[hsp_xml(100.0 + i as f64, 1e-30, 80, 2, 100)]))
        .collect();
    blast_output_xml(&[iteration_xml(
        "contig_1_1 # 3 # 605 # 1 # ID=1_1;partial=00",
        200,
        &hits,
    )])
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

pub fn match_report(compounds: &[(&str, &str)], enzymes: &[(&str, &str)]) -> String {
    let mut text = String::from("Compound list:\n");
    for (key, value) in compounds {
        text.push_str(&format!("{}: {}\n", key, value));
    }
    text.push_str("\nEnzyme list:\n");
    for (key, value) in enzymes {
        text.push_str(&format!("{}: {}\n", key, value));
    }
    text
}

/// The biopathpred binary, isolated from any configuration in the caller's environment
pub fn biopathpred_cmd() -> Command {
    let mut cmd = Command::cargo_bin("biopathpred").unwrap();
    cmd.env_remove("BIOPATHPRED_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}
