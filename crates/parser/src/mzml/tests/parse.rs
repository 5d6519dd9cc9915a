use crate::error::ExtractError;
use crate::mzml::parse_mzml;

const DOC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<indexedmzML xmlns="http://psi.hupo.org/ms/mzml">
 <mzML id="sample_run" version="1.1.0">
  <cvList count="1">
   <cv id="MS" fullName="Proteomics Standards Initiative Mass Spectrometry Ontology"/>
  </cvList>
  <run id="r1" startTimeStamp="2024-03-16T10:15:30Z">
   <spectrumList count="2" defaultDataProcessingRef="dp1">
    <spectrum index="0" id="scan=1" defaultArrayLength="2">
     <cvParam cvRef="MS" accession="MS:1000511" name="ms level" value="1"/>
     <cvParam cvRef="MS" accession="MS:1000128" name="profile spectrum" value=""/>
     <scanList count="1">
      <scan>
       <cvParam cvRef="MS" accession="MS:1000016" name="scan start time" value="0.5" unitName="minute"/>
       <scanWindowList count="1">
        <scanWindow>
         <cvParam cvRef="MS" accession="MS:1000501" name="scan window lower limit" value="70"/>
         <cvParam cvRef="MS" accession="MS:1000500" name="scan window upper limit" value="1000"/>
        </scanWindow>
       </scanWindowList>
      </scan>
     </scanList>
     <precursorList count="1">
      <precursor spectrumRef="scan=0">
       <isolationWindow>
        <cvParam cvRef="MS" accession="MS:1000827" name="isolation window target m/z" value="445.34"/>
       </isolationWindow>
       <selectedIonList count="1">
        <selectedIon>
         <cvParam cvRef="MS" accession="MS:1000744" name="selected ion m/z" value="445.34"/>
        </selectedIon>
       </selectedIonList>
       <activation>
        <cvParam cvRef="MS" accession="MS:1000133" name="collision-induced dissociation" value=""/>
        <cvParam cvRef="MS" accession="MS:1000045" name="collision energy" value="35"/>
       </activation>
      </precursor>
     </precursorList>
     <binaryDataArrayList count="2">
      <binaryDataArray encodedLength="12">
       <cvParam cvRef="MS" accession="MS:1000523" name="64-bit float" value=""/>
       <cvParam cvRef="MS" accession="MS:1000576" name="no compression" value=""/>
       <cvParam cvRef="MS" accession="MS:1000514" name="m/z array" value=""/>
       <binary>AAAAAAAA8D8=</binary>
      </binaryDataArray>
      <binaryDataArray encodedLength="12">
       <cvParam cvRef="MS" accession="MS:1000523" name="64-bit float" value=""/>
       <cvParam cvRef="MS" accession="MS:1000576" name="no compression" value=""/>
       <cvParam cvRef="MS" accession="MS:1000515" name="intensity array" value=""/>
       <binary></binary>
      </binaryDataArray>
     </binaryDataArrayList>
    </spectrum>
    <spectrum index="1" id="scan=2" defaultArrayLength="0"/>
   </spectrumList>
   <chromatogramList count="1" defaultDataProcessingRef="dp1">
    <chromatogram index="0" id="TIC" defaultArrayLength="2">
     <cvParam cvRef="MS" accession="MS:1000235" name="total ion current chromatogram" value=""/>
     <userParam name="MS_dwell_time" value="0.5"/>
     <binaryDataArrayList count="1">
      <binaryDataArray encodedLength="12">
       <cvParam cvRef="MS" accession="MS:1000523" name="64-bit float" value=""/>
       <cvParam cvRef="MS" accession="MS:1000595" name="time array" value=""/>
       <binary>AAAAAAAA8D8=</binary>
      </binaryDataArray>
     </binaryDataArrayList>
    </chromatogram>
   </chromatogramList>
  </run>
 </mzML>
</indexedmzML>"#;

#[test]
fn parses_wrapped_document() {
    let mzml = parse_mzml(DOC.as_bytes()).expect("parse failed");

    assert_eq!(mzml.id.as_deref(), Some("sample_run"));
    assert_eq!(mzml.version.as_deref(), Some("1.1.0"));
    assert_eq!(mzml.run.id, "r1");
    assert_eq!(
        mzml.run.start_time_stamp.as_deref(),
        Some("2024-03-16T10:15:30Z")
    );
}

#[test]
fn parses_spectrum_tree() {
    let mzml = parse_mzml(DOC.as_bytes()).expect("parse failed");
    let list = mzml.run.spectrum_list.as_ref().expect("spectrumList");
    assert_eq!(list.count, Some(2));
    assert_eq!(list.spectra.len(), 2);

    let s = &list.spectra[0];
    assert_eq!(s.id, "scan=1");
    assert_eq!(s.index, Some(0));
    assert_eq!(s.default_array_length, Some(2));
    assert_eq!(s.cv_params.len(), 2);
    assert_eq!(s.cv_params[0].name, "ms level");
    assert_eq!(s.cv_params[0].value.as_deref(), Some("1"));

    let scan_list = s.scan_list.as_ref().expect("scanList");
    assert_eq!(scan_list.scans.len(), 1);
    let scan = &scan_list.scans[0];
    assert_eq!(scan.cv_params[0].name, "scan start time");
    assert_eq!(scan.cv_params[0].unit_name.as_deref(), Some("minute"));

    let windows = scan.scan_window_list.as_ref().expect("scanWindowList");
    assert_eq!(windows.scan_windows.len(), 1);
    assert_eq!(windows.scan_windows[0].cv_params.len(), 2);

    let precursors = s.precursor_list.as_ref().expect("precursorList");
    let p = &precursors.precursors[0];
    assert_eq!(p.spectrum_ref.as_deref(), Some("scan=0"));
    let iso = p.isolation_window.as_ref().expect("isolationWindow");
    assert_eq!(iso.cv_params[0].value.as_deref(), Some("445.34"));
    let ions = p.selected_ion_list.as_ref().expect("selectedIonList");
    assert_eq!(ions.selected_ions.len(), 1);
    let act = p.activation.as_ref().expect("activation");
    assert_eq!(act.cv_params[1].name, "collision energy");

    // Empty spectrum element still yields an entry.
    let empty = &list.spectra[1];
    assert_eq!(empty.id, "scan=2");
    assert_eq!(empty.default_array_length, Some(0));
    assert!(empty.binary_data_array_list.is_none());
}

#[test]
fn keeps_binary_payload_text_verbatim() {
    let mzml = parse_mzml(DOC.as_bytes()).expect("parse failed");
    let list = mzml.run.spectrum_list.as_ref().expect("spectrumList");
    let bdal = list.spectra[0]
        .binary_data_array_list
        .as_ref()
        .expect("binaryDataArrayList");
    assert_eq!(bdal.count, Some(2));
    assert_eq!(
        bdal.binary_data_arrays[0].binary.as_deref(),
        Some("AAAAAAAA8D8=")
    );
    // <binary></binary> parses as present-but-empty.
    assert_eq!(bdal.binary_data_arrays[1].binary.as_deref(), Some(""));
}

#[test]
fn parses_chromatogram_tree() {
    let mzml = parse_mzml(DOC.as_bytes()).expect("parse failed");
    let list = mzml.run.chromatogram_list.as_ref().expect("chromatogramList");
    assert_eq!(list.chromatograms.len(), 1);

    let c = &list.chromatograms[0];
    assert_eq!(c.id, "TIC");
    assert_eq!(c.index, Some(0));
    assert_eq!(c.cv_params[0].name, "total ion current chromatogram");
    assert_eq!(c.user_params[0].name, "MS_dwell_time");
    assert_eq!(c.user_params[0].value.as_deref(), Some("0.5"));
    let bdal = c.binary_data_array_list.as_ref().expect("binaryDataArrayList");
    assert_eq!(bdal.binary_data_arrays.len(), 1);
}

#[test]
fn rejects_document_without_mzml_root() {
    let err = parse_mzml(b"<notMzml/>").unwrap_err();
    assert!(matches!(err, ExtractError::MalformedDocument(_)), "got {err}");
}

#[test]
fn rejects_truncated_spectrum() {
    let doc = r#"<mzML id="x"><run id="r"><spectrumList count="1"><spectrum index="0" id="s1">"#;
    let err = parse_mzml(doc.as_bytes()).unwrap_err();
    assert!(matches!(err, ExtractError::MalformedDocument(_)), "got {err}");
}
