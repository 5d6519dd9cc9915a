use elute::encode;

/// Inputs for one synthesized `<spectrum>` element.
#[allow(dead_code)]
pub struct SpectrumDoc<'a> {
    pub id: &'a str,
    pub ms_level: u32,
    pub spectrum_type: &'a str,
    pub polarity: &'a str,
    pub rt_minutes: f64,
    pub mz: &'a [f64],
    pub intensity: &'a [f64],
}

fn binary_data_array(name: &str, accession: &str, values: &[f64]) -> String {
    let payload = encode(64, "none", values).unwrap();
    format!(
        concat!(
            "<binaryDataArray encodedLength=\"{len}\">\n",
            "<cvParam cvRef=\"MS\" accession=\"MS:1000523\" name=\"64-bit float\"/>\n",
            "<cvParam cvRef=\"MS\" accession=\"MS:1000576\" name=\"no compression\"/>\n",
            "<cvParam cvRef=\"MS\" accession=\"{accession}\" name=\"{name}\"/>\n",
            "<binary>{payload}</binary>\n",
            "</binaryDataArray>\n",
        ),
        len = payload.len(),
        accession = accession,
        name = name,
        payload = payload,
    )
}

/// Builds an indexedmzML-wrapped document holding only a spectrum list, with
/// summary cvParams computed from the point data the way acquisition software
/// writes them.
#[allow(dead_code)]
pub fn full_scan_document(start_time_stamp: &str, spectra: &[SpectrumDoc]) -> String {
    let mut body = String::new();
    for (i, s) in spectra.iter().enumerate() {
        let scan_type = if s.ms_level == 1 {
            "MS1 spectrum"
        } else {
            "MSn spectrum"
        };
        let total_ion_current: f64 = s.intensity.iter().sum();
        let (base_peak_mz, base_peak_intensity) = s
            .mz
            .iter()
            .zip(s.intensity)
            .fold((0.0, 0.0), |best, (&mz, &intensity)| {
                if intensity > best.1 { (mz, intensity) } else { best }
            });
        body.push_str(&format!(
            concat!(
                "<spectrum index=\"{i}\" id=\"{id}\" defaultArrayLength=\"{n}\">\n",
                "<cvParam cvRef=\"MS\" accession=\"MS:1000511\" name=\"ms level\" value=\"{level}\"/>\n",
                "<cvParam cvRef=\"MS\" accession=\"MS:1000580\" name=\"{scan_type}\"/>\n",
                "<cvParam cvRef=\"MS\" accession=\"MS:1000128\" name=\"{spectrum_type}\"/>\n",
                "<cvParam cvRef=\"MS\" accession=\"MS:1000130\" name=\"{polarity}\"/>\n",
                "<cvParam cvRef=\"MS\" accession=\"MS:1000504\" name=\"base peak m/z\" value=\"{bp_mz}\"/>\n",
                "<cvParam cvRef=\"MS\" accession=\"MS:1000505\" name=\"base peak intensity\" value=\"{bp_int}\"/>\n",
                "<cvParam cvRef=\"MS\" accession=\"MS:1000285\" name=\"total ion current\" value=\"{tic}\"/>\n",
                "<scanList count=\"1\">\n",
                "<scan>\n",
                "<cvParam cvRef=\"MS\" accession=\"MS:1000016\" name=\"scan start time\" value=\"{rt}\" unitCvRef=\"UO\" unitName=\"minute\"/>\n",
                "</scan>\n",
                "</scanList>\n",
                "<binaryDataArrayList count=\"2\">\n",
                "{mz_array}",
                "{intensity_array}",
                "</binaryDataArrayList>\n",
                "</spectrum>\n",
            ),
            i = i,
            id = s.id,
            n = s.mz.len(),
            level = s.ms_level,
            scan_type = scan_type,
            spectrum_type = s.spectrum_type,
            polarity = s.polarity,
            bp_mz = base_peak_mz,
            bp_int = base_peak_intensity,
            tic = total_ion_current,
            rt = s.rt_minutes,
            mz_array = binary_data_array("m/z array", "MS:1000514", s.mz),
            intensity_array = binary_data_array("intensity array", "MS:1000515", s.intensity),
        ));
    }
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<indexedmzML xmlns=\"http://psi.hupo.org/ms/mzml\">\n",
            "<mzML xmlns=\"http://psi.hupo.org/ms/mzml\" id=\"exp01\" version=\"1.1.0\">\n",
            "<run id=\"run01\" startTimeStamp=\"{stamp}\">\n",
            "<spectrumList count=\"{count}\" defaultDataProcessingRef=\"dp1\">\n",
            "{body}",
            "</spectrumList>\n",
            "</run>\n",
            "</mzML>\n",
            "</indexedmzML>\n",
        ),
        stamp = start_time_stamp,
        count = spectra.len(),
        body = body,
    )
}

/// Builds a document holding only a chromatogram list, the shape SRM
/// acquisitions produce.
#[allow(dead_code)]
pub fn srm_document(time: &[f64], intensity: &[f64], ms_levels: &[f64]) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<mzML xmlns=\"http://psi.hupo.org/ms/mzml\" id=\"srm01\" version=\"1.1.0\">\n",
            "<run id=\"run01\" startTimeStamp=\"2023-11-05T08:01:00Z\">\n",
            "<chromatogramList count=\"2\" defaultDataProcessingRef=\"dp1\">\n",
            "<chromatogram index=\"0\" id=\"TIC\" defaultArrayLength=\"{n}\">\n",
            "<cvParam cvRef=\"MS\" accession=\"MS:1000235\" name=\"total ion current chromatogram\"/>\n",
            "<binaryDataArrayList count=\"2\">\n",
            "{tic_time}",
            "{tic_intensity}",
            "</binaryDataArrayList>\n",
            "</chromatogram>\n",
            "<chromatogram index=\"1\" id=\"SRM SIC Q1=456.7 Q3=678.9\" defaultArrayLength=\"{n}\">\n",
            "<cvParam cvRef=\"MS\" accession=\"MS:1001473\" name=\"selected reaction monitoring chromatogram\"/>\n",
            "<cvParam cvRef=\"MS\" accession=\"MS:1000129\" name=\"negative scan\"/>\n",
            "<userParam name=\"MS_dwell_time\" value=\"0.295\" type=\"xsd:float\"/>\n",
            "<precursor>\n",
            "<isolationWindow>\n",
            "<cvParam cvRef=\"MS\" accession=\"MS:1000827\" name=\"isolation window target m/z\" value=\"456.7\"/>\n",
            "</isolationWindow>\n",
            "<activation>\n",
            "<cvParam cvRef=\"MS\" accession=\"MS:1000133\" name=\"collision-induced dissociation\"/>\n",
            "<cvParam cvRef=\"MS\" accession=\"MS:1000045\" name=\"collision energy\" value=\"30\"/>\n",
            "</activation>\n",
            "</precursor>\n",
            "<product>\n",
            "<isolationWindow>\n",
            "<cvParam cvRef=\"MS\" accession=\"MS:1000827\" name=\"isolation window target m/z\" value=\"678.9\"/>\n",
            "</isolationWindow>\n",
            "</product>\n",
            "<binaryDataArrayList count=\"3\">\n",
            "{srm_time}",
            "{srm_intensity}",
            "{srm_levels}",
            "</binaryDataArrayList>\n",
            "</chromatogram>\n",
            "</chromatogramList>\n",
            "</run>\n",
            "</mzML>\n",
        ),
        n = time.len(),
        tic_time = binary_data_array("time array", "MS:1000595", time),
        tic_intensity = binary_data_array("intensity array", "MS:1000515", intensity),
        srm_time = binary_data_array("time array", "MS:1000595", time),
        srm_intensity = binary_data_array("intensity array", "MS:1000515", intensity),
        srm_levels = binary_data_array("non-standard data array", "MS:1000786", ms_levels),
    )
}
