// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use monomap_inventory::{
    Case, CaseId, Detection, Error, ImageUpload, Inventory, Item, LabelDetector, NewCase, NewItem,
    RackId,
};
use tracing::{debug, warn};

/// Identifies one outstanding label detection.
#[must_use = "the detection result must be passed to `finish_detection`"]
#[derive(Debug, PartialEq, Eq)]
pub struct DetectionTicket {
    seq: u64,
}

/// State of the item registration form.
///
/// The rack and case choice survive a submission so several items can be
/// registered into the same case in a row; name, label and image are reset.
#[derive(Clone, Debug, Default)]
pub struct Registration {
    rack: Option<RackId>,
    cases: Vec<Case>,
    case: Option<CaseId>,
    name: String,
    ai_label: Option<String>,
    image: Option<ImageUpload>,
    saved: bool,
    detect_seq: u64,
    detecting: bool,
}

impl Registration {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The chosen rack.
    #[must_use]
    pub fn rack(&self) -> Option<RackId> {
        self.rack
    }

    /// Cases of the chosen rack.
    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// The chosen case.
    #[must_use]
    pub fn case(&self) -> Option<CaseId> {
        self.case
    }

    /// The item name as typed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label suggested for the attached image, unless dismissed.
    #[must_use]
    pub fn ai_label(&self) -> Option<&str> {
        self.ai_label.as_deref()
    }

    /// The attached image.
    #[must_use]
    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    /// Returns `true` while the classifier is looking at the attached image.
    #[must_use]
    pub fn detecting(&self) -> bool {
        self.detecting
    }

    /// Returns `true` after a successful submission until the form is edited again.
    #[must_use]
    pub fn saved(&self) -> bool {
        self.saved
    }

    /// Chooses `rack` and loads its cases. The case choice is cleared.
    ///
    /// On failure the form keeps its previous rack and cases.
    pub async fn select_rack(&mut self, inventory: &impl Inventory, rack: RackId) -> Result<(), Error> {
        let cases = inventory
            .list_cases(rack)
            .await
            .inspect_err(|err| warn!(%err, %rack, "loading cases failed"))?;
        self.rack = Some(rack);
        self.cases = cases;
        self.case = None;
        self.saved = false;
        Ok(())
    }

    /// Chooses a case of the chosen rack. Returns `false` for unknown cases.
    pub fn select_case(&mut self, case: CaseId) -> bool {
        if !self.cases.iter().any(|c| c.id == case) {
            return false;
        }
        self.case = Some(case);
        self.saved = false;
        true
    }

    /// Creates a new case under the chosen rack and chooses it.
    ///
    /// Returns `Ok(None)` without a request when no rack is chosen.
    pub async fn add_case(&mut self, inventory: &impl Inventory) -> Result<Option<CaseId>, Error> {
        let Some(rack) = self.rack else {
            return Ok(None);
        };
        let case = inventory
            .create_case(&NewCase { rack_id: rack })
            .await
            .inspect_err(|err| warn!(%err, %rack, "adding case failed"))?;
        let id = case.id;
        self.cases.push(case);
        self.case = Some(id);
        self.saved = false;
        Ok(Some(id))
    }

    /// Replaces the item name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.saved = false;
    }

    /// Attaches `image` and asks `detector` for a label.
    ///
    /// A suggestion replaces the label and also becomes the name if no name
    /// was typed yet. Without a suggestion, or if the classifier fails, the
    /// form carries on with no label.
    pub async fn attach_image(&mut self, detector: &impl LabelDetector, image: ImageUpload) {
        let ticket = self.begin_detection(image);
        let result = match &self.image {
            Some(image) => detector.detect(image).await,
            None => Ok(None),
        };
        self.finish_detection(ticket, result);
    }

    /// Attaches `image` without waiting for the classifier.
    ///
    /// Clears the previous label and turns [`Registration::detecting`] on; run
    /// the detector on [`Registration::image`] and hand its answer to
    /// [`Registration::finish_detection`].
    pub fn begin_detection(&mut self, image: ImageUpload) -> DetectionTicket {
        self.saved = false;
        self.image = Some(image);
        self.ai_label = None;
        self.detect_seq = self.detect_seq.wrapping_add(1);
        self.detecting = true;
        DetectionTicket {
            seq: self.detect_seq,
        }
    }

    /// Delivers the classifier's answer for the detection identified by `ticket`.
    ///
    /// Answers for an image that has since been replaced are dropped. Any
    /// answer for the current image ends [`Registration::detecting`], failures
    /// included. Returns whether a label was suggested.
    pub fn finish_detection(
        &mut self,
        ticket: DetectionTicket,
        result: Result<Option<Detection>, Error>,
    ) -> bool {
        if ticket.seq != self.detect_seq {
            debug!("dropping detection for a replaced image");
            return false;
        }
        self.detecting = false;
        match result {
            Ok(Some(detection)) => {
                debug!(label = %detection.label, confidence = detection.confidence, "label suggested");
                if self.name.trim().is_empty() {
                    self.name.clone_from(&detection.label);
                }
                self.ai_label = Some(detection.label);
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(%err, "label detection failed");
                false
            }
        }
    }

    /// Drops the suggested label; the name is kept.
    pub fn dismiss_label(&mut self) {
        self.ai_label = None;
    }

    /// Returns `true` if a case is chosen and the name is not blank.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.case.is_some() && !self.name.trim().is_empty()
    }

    /// Creates the item.
    ///
    /// Returns `Ok(None)` without a request if the form is incomplete. On
    /// success name, label and image are cleared and [`Registration::saved`]
    /// turns `true`; on failure the form is left as it was.
    pub async fn submit(&mut self, inventory: &impl Inventory) -> Result<Option<Item>, Error> {
        let Some(case_id) = self.case.filter(|_| self.can_submit()) else {
            return Ok(None);
        };
        let request = NewItem {
            name: self.name.trim().to_owned(),
            case_id,
            ai_label: self.ai_label.clone(),
            image: self.image.clone(),
        };
        let item = inventory
            .create_item(request)
            .await
            .inspect_err(|err| warn!(%err, case = %case_id, "registering item failed"))?;
        debug!(item = %item.id, case = %case_id, "item registered");
        self.name.clear();
        self.ai_label = None;
        self.image = None;
        self.saved = true;
        Ok(Some(item))
    }
}
